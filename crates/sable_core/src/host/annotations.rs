//! Validation and web-routing attribute modules.

use super::AttributeTarget as T;
use super::{AttributeDef, HostModule, attribute, optional, param};

const MEMBER: &[T] = &[T::Property, T::Field, T::Parameter];
const ACTION: &[T] = &[T::Method];

const DATA_ANNOTATION_ATTRIBUTES: &[AttributeDef] = &[
    attribute("RequiredAttribute", MEMBER, false, &[]),
    attribute("RangeAttribute", MEMBER, false, &[param("minimum", "double"), param("maximum", "double")]),
    attribute(
        "StringLengthAttribute",
        MEMBER,
        false,
        &[param("maximumLength", "int")],
    ),
    attribute("MinLengthAttribute", MEMBER, false, &[param("length", "int")]),
    attribute("MaxLengthAttribute", MEMBER, false, &[param("length", "int")]),
    attribute("RegularExpressionAttribute", MEMBER, false, &[param("pattern", "string")]),
    attribute("KeyAttribute", &[T::Property, T::Field], false, &[]),
    attribute("DisplayAttribute", &[T::Property, T::Field, T::Method, T::Class], false, &[]),
];

const WEB_ATTRIBUTES: &[AttributeDef] = &[
    attribute("HttpGetAttribute", ACTION, true, &[optional("template", "string")]),
    attribute("HttpPostAttribute", ACTION, true, &[optional("template", "string")]),
    attribute("HttpPutAttribute", ACTION, true, &[optional("template", "string")]),
    attribute("HttpDeleteAttribute", ACTION, true, &[optional("template", "string")]),
    attribute("HttpPatchAttribute", ACTION, true, &[optional("template", "string")]),
    attribute("RouteAttribute", &[T::Class, T::Method], true, &[param("template", "string")]),
    attribute("ApiControllerAttribute", &[T::Class, T::Assembly], false, &[]),
    attribute("FromBodyAttribute", &[T::Parameter], false, &[]),
    attribute("FromQueryAttribute", &[T::Parameter], false, &[]),
];

pub const DATA_ANNOTATIONS: HostModule = HostModule {
    name: "System.ComponentModel.DataAnnotations",
    namespace: "System.ComponentModel.DataAnnotations",
    types: &[],
    functions: &[],
    attributes: DATA_ANNOTATION_ATTRIBUTES,
};

pub const WEB: HostModule = HostModule {
    name: "System.Web.Http",
    namespace: "System.Web.Http",
    types: &[],
    functions: &[],
    attributes: WEB_ATTRIBUTES,
};
