//! `System`: primitives, console, math, exceptions and the core attribute types.

use super::AttributeTarget as T;
use super::{
    HostModule, TypeDef, TypeKind, attribute, class, ctor, method, optional, param, primitive, rest, static_method,
};

const OBJECT_METHODS: &[super::MethodDef] = &[
    method("ToString", &[], "string"),
    method("Equals", &[param("obj", "object")], "bool"),
    method("GetHashCode", &[], "int"),
    method("GetType", &[], "Type"),
];

const TYPES: &[TypeDef] = &[
    class("Object", None, &[ctor(&[])], OBJECT_METHODS),
    primitive(
        "String",
        &[
            method("Contains", &[param("value", "string")], "bool"),
            method("StartsWith", &[param("value", "string")], "bool"),
            method("EndsWith", &[param("value", "string")], "bool"),
            method("IndexOf", &[param("value", "string")], "int"),
            method("Substring", &[param("startIndex", "int"), optional("length", "int")], "string"),
            method("Replace", &[param("oldValue", "string"), param("newValue", "string")], "string"),
            method("Split", &[rest("separator", "char")], "string[]"),
            method("Trim", &[], "string"),
            method("ToUpper", &[], "string"),
            method("ToLower", &[], "string"),
            static_method("Format", &[param("format", "string"), rest("args", "object")], "string"),
            static_method("Join", &[param("separator", "string"), rest("values", "object")], "string"),
            static_method("IsNullOrEmpty", &[param("value", "string")], "bool"),
            static_method("Concat", &[rest("values", "object")], "string"),
        ],
        &["Length", "Empty"],
    ),
    primitive(
        "Int32",
        &[
            static_method("Parse", &[param("s", "string")], "int"),
            static_method("TryParse", &[param("s", "string"), param("result", "int")], "bool"),
        ],
        &["MaxValue", "MinValue"],
    ),
    primitive("Int64", &[static_method("Parse", &[param("s", "string")], "long")], &["MaxValue", "MinValue"]),
    primitive("Int16", &[], &["MaxValue", "MinValue"]),
    primitive("Byte", &[], &["MaxValue", "MinValue"]),
    primitive("Char", &[static_method("IsDigit", &[param("c", "char")], "bool")], &[]),
    primitive("Boolean", &[static_method("Parse", &[param("value", "string")], "bool")], &[]),
    primitive("Single", &[], &["MaxValue", "MinValue", "NaN"]),
    primitive(
        "Double",
        &[
            static_method("Parse", &[param("s", "string")], "double"),
            static_method("IsNaN", &[param("d", "double")], "bool"),
        ],
        &["MaxValue", "MinValue", "NaN", "PositiveInfinity"],
    ),
    primitive("Decimal", &[], &["MaxValue", "MinValue", "Zero"]),
    primitive("Void", &[], &[]),
    class(
        "Array",
        Some("Object"),
        &[],
        &[
            static_method("Sort", &[param("array", "Array")], "void"),
            static_method("Reverse", &[param("array", "Array")], "void"),
            static_method("IndexOf", &[param("array", "Array"), param("value", "object")], "int"),
        ],
    ),
    class(
        "Console",
        Some("Object"),
        &[],
        &[
            static_method("WriteLine", &[optional("format", "string"), rest("args", "object")], "void"),
            static_method("Write", &[param("format", "string"), rest("args", "object")], "void"),
            static_method("ReadLine", &[], "string?"),
            static_method("Clear", &[], "void"),
        ],
    ),
    class(
        "Math",
        Some("Object"),
        &[],
        &[
            static_method("Abs", &[param("value", "double")], "double"),
            static_method("Max", &[param("a", "double"), param("b", "double")], "double"),
            static_method("Min", &[param("a", "double"), param("b", "double")], "double"),
            static_method("Pow", &[param("x", "double"), param("y", "double")], "double"),
            static_method("Sqrt", &[param("d", "double")], "double"),
            static_method("Floor", &[param("d", "double")], "double"),
            static_method("Ceiling", &[param("d", "double")], "double"),
            static_method("Round", &[param("value", "double"), optional("digits", "int")], "double"),
        ],
    ),
    class(
        "Exception",
        Some("Object"),
        &[
            ctor(&[]),
            ctor(&[param("message", "string")]),
            ctor(&[param("message", "string"), param("innerException", "Exception")]),
        ],
        &[],
    ),
    class(
        "ArgumentException",
        Some("Exception"),
        &[ctor(&[]), ctor(&[param("message", "string")]), ctor(&[param("message", "string"), param("paramName", "string")])],
        &[],
    ),
    class(
        "InvalidOperationException",
        Some("Exception"),
        &[ctor(&[]), ctor(&[param("message", "string")])],
        &[],
    ),
    class(
        "NotImplementedException",
        Some("Exception"),
        &[ctor(&[]), ctor(&[param("message", "string")])],
        &[],
    ),
    TypeDef {
        name: "DateTime",
        kind: TypeKind::Struct,
        base: None,
        generic_params: &[],
        constructors: &[
            ctor(&[param("year", "int"), param("month", "int"), param("day", "int")]),
            ctor(&[
                param("year", "int"),
                param("month", "int"),
                param("day", "int"),
                param("hour", "int"),
                param("minute", "int"),
                param("second", "int"),
            ]),
        ],
        methods: &[
            method("AddDays", &[param("value", "double")], "DateTime"),
            method("ToString", &[optional("format", "string")], "string"),
            static_method("Parse", &[param("s", "string")], "DateTime"),
        ],
        fields: &["Now", "UtcNow", "Today", "Year", "Month", "Day"],
    },
    TypeDef {
        name: "TimeSpan",
        kind: TypeKind::Struct,
        base: None,
        generic_params: &[],
        constructors: &[ctor(&[param("hours", "int"), param("minutes", "int"), param("seconds", "int")])],
        methods: &[static_method("FromSeconds", &[param("value", "double")], "TimeSpan")],
        fields: &["TotalSeconds", "Zero"],
    },
    TypeDef {
        name: "Guid",
        kind: TypeKind::Struct,
        base: None,
        generic_params: &[],
        constructors: &[ctor(&[]), ctor(&[param("g", "string")])],
        methods: &[static_method("NewGuid", &[], "Guid")],
        fields: &["Empty"],
    },
    class(
        "Random",
        Some("Object"),
        &[ctor(&[]), ctor(&[param("seed", "int")])],
        &[
            method("Next", &[optional("minValue", "int"), optional("maxValue", "int")], "int"),
            method("NextDouble", &[], "double"),
        ],
    ),
    class(
        "Convert",
        Some("Object"),
        &[],
        &[
            static_method("ToInt32", &[param("value", "object")], "int"),
            static_method("ToDouble", &[param("value", "object")], "double"),
            static_method("ToString", &[param("value", "object")], "string"),
            static_method("ToBoolean", &[param("value", "object")], "bool"),
        ],
    ),
    class("Type", Some("Object"), &[], &[method("GetMethods", &[], "object[]")]),
    class("Attribute", Some("Object"), &[ctor(&[])], &[]),
];

const ATTRIBUTES: &[super::AttributeDef] = &[
    attribute(
        "ObsoleteAttribute",
        &[T::Class, T::Struct, T::Enum, T::Interface, T::Constructor, T::Method, T::Property, T::Field],
        false,
        &[optional("message", "string"), optional("error", "bool")],
    ),
    attribute("SerializableAttribute", &[T::Class, T::Struct, T::Enum], false, &[]),
    attribute("NonSerializedAttribute", &[T::Field], false, &[]),
    attribute("FlagsAttribute", &[T::Enum], false, &[]),
    attribute("CLSCompliantAttribute", &[], false, &[param("isCompliant", "bool")]),
    attribute("AttributeUsageAttribute", &[T::Class], false, &[param("validOn", "int")]),
];

pub const SYSTEM: HostModule = HostModule {
    name: "System",
    namespace: "System",
    types: TYPES,
    functions: &[],
    attributes: ATTRIBUTES,
};
