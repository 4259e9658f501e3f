//! The language's own standard-library module.

use super::AttributeTarget as T;
use super::{AttributeDef, HostModule, MethodDef, TypeDef, attribute, class, optional, param, rest, static_method};

const FUNCTIONS: &[MethodDef] = &[
    static_method("print", &[rest("values", "object")], "void"),
    static_method("println", &[rest("values", "object")], "void"),
    static_method("input", &[optional("prompt", "string")], "string"),
    static_method("len", &[param("value", "object")], "int"),
    static_method("range", &[param("start", "int"), optional("end", "int"), optional("step", "int")], "int[]"),
    static_method("assert", &[param("condition", "bool"), optional("message", "string")], "void"),
    static_method("panic", &[param("message", "string")], "void"),
    static_method("str", &[param("value", "object")], "string"),
    static_method("int", &[param("value", "object")], "int"),
    static_method("float", &[param("value", "object")], "double"),
];

const TYPES: &[TypeDef] = &[class(
    "Runtime",
    None,
    &[],
    &[
        static_method("exit", &[param("code", "int")], "void"),
        static_method("args", &[], "string[]"),
        static_method("env", &[param("name", "string")], "string?"),
    ],
)];

const ATTRIBUTES: &[AttributeDef] = &[
    attribute(
        "ExternAttribute",
        &[T::Class, T::Struct, T::Method, T::Property, T::Field],
        false,
        &[optional("library", "string")],
    ),
    attribute("TestAttribute", &[T::Method], false, &[]),
    attribute("InlineAttribute", &[T::Method, T::Constructor], false, &[]),
    attribute("EntryPointAttribute", &[T::Method], false, &[]),
];

pub const STDLIB: HostModule = HostModule {
    name: "Sable",
    namespace: "Sable",
    types: TYPES,
    functions: FUNCTIONS,
    attributes: ATTRIBUTES,
};
