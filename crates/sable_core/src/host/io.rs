//! `System.IO` and `System.Text`.

use super::{HostModule, TypeDef, class, ctor, method, optional, param, rest, static_method};

const IO_TYPES: &[TypeDef] = &[
    class(
        "File",
        Some("Object"),
        &[],
        &[
            static_method("ReadAllText", &[param("path", "string")], "string"),
            static_method("WriteAllText", &[param("path", "string"), param("contents", "string")], "void"),
            static_method("ReadAllLines", &[param("path", "string")], "string[]"),
            static_method("Exists", &[param("path", "string")], "bool"),
            static_method("Delete", &[param("path", "string")], "void"),
        ],
    ),
    class(
        "Path",
        Some("Object"),
        &[],
        &[
            static_method("Combine", &[rest("paths", "string")], "string"),
            static_method("GetFileName", &[param("path", "string")], "string"),
            static_method("GetExtension", &[param("path", "string")], "string"),
        ],
    ),
    class(
        "Directory",
        Some("Object"),
        &[],
        &[
            static_method("Exists", &[param("path", "string")], "bool"),
            static_method("CreateDirectory", &[param("path", "string")], "void"),
            static_method("GetFiles", &[param("path", "string"), optional("searchPattern", "string")], "string[]"),
        ],
    ),
    class(
        "StreamReader",
        Some("Object"),
        &[ctor(&[param("path", "string")])],
        &[method("ReadLine", &[], "string?"), method("ReadToEnd", &[], "string"), method("Close", &[], "void")],
    ),
    class(
        "StreamWriter",
        Some("Object"),
        &[ctor(&[param("path", "string")]), ctor(&[param("path", "string"), param("append", "bool")])],
        &[
            method("Write", &[param("value", "string")], "void"),
            method("WriteLine", &[optional("value", "string")], "void"),
            method("Close", &[], "void"),
        ],
    ),
];

const TEXT_TYPES: &[TypeDef] = &[
    class(
        "StringBuilder",
        Some("Object"),
        &[ctor(&[]), ctor(&[param("value", "string")])],
        &[
            method("Append", &[param("value", "object")], "StringBuilder"),
            method("AppendLine", &[optional("value", "string")], "StringBuilder"),
            method("Clear", &[], "StringBuilder"),
            method("ToString", &[], "string"),
        ],
    ),
    class(
        "Encoding",
        Some("Object"),
        &[],
        &[
            method("GetBytes", &[param("s", "string")], "byte[]"),
            method("GetString", &[param("bytes", "byte[]")], "string"),
        ],
    ),
];

pub const IO: HostModule = HostModule {
    name: "System.IO",
    namespace: "System.IO",
    types: IO_TYPES,
    functions: &[],
    attributes: &[],
};

pub const TEXT: HostModule = HostModule {
    name: "System.Text",
    namespace: "System.Text",
    types: TEXT_TYPES,
    functions: &[],
    attributes: &[],
};
