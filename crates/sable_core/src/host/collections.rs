//! `System.Collections.Generic`: the generic collection templates.

use super::{HostModule, MethodDef, TypeDef, TypeKind, ctor, generic, method, param};

const LIST_METHODS: &[MethodDef] = &[
    method("Add", &[param("item", "T")], "void"),
    method("AddRange", &[param("collection", "IEnumerable<T>")], "void"),
    method("Remove", &[param("item", "T")], "bool"),
    method("RemoveAt", &[param("index", "int")], "void"),
    method("Insert", &[param("index", "int"), param("item", "T")], "void"),
    method("Contains", &[param("item", "T")], "bool"),
    method("IndexOf", &[param("item", "T")], "int"),
    method("Clear", &[], "void"),
    method("Sort", &[], "void"),
    method("Reverse", &[], "void"),
    method("ToArray", &[], "T[]"),
];

const TYPES: &[TypeDef] = &[
    TypeDef {
        fields: &["Count", "Capacity"],
        ..generic(
            "List`1",
            TypeKind::Class,
            &["T"],
            &[ctor(&[]), ctor(&[param("capacity", "int")])],
            LIST_METHODS,
        )
    },
    TypeDef {
        fields: &["Count", "Keys", "Values"],
        ..generic(
            "Dictionary`2",
            TypeKind::Class,
            &["TKey", "TValue"],
            &[ctor(&[]), ctor(&[param("capacity", "int")])],
            &[
                method("Add", &[param("key", "TKey"), param("value", "TValue")], "void"),
                method("ContainsKey", &[param("key", "TKey")], "bool"),
                method("ContainsValue", &[param("value", "TValue")], "bool"),
                method("Remove", &[param("key", "TKey")], "bool"),
                method("TryGetValue", &[param("key", "TKey"), param("value", "TValue")], "bool"),
                method("Clear", &[], "void"),
            ],
        )
    },
    TypeDef {
        fields: &["Count"],
        ..generic(
            "HashSet`1",
            TypeKind::Class,
            &["T"],
            &[ctor(&[])],
            &[
                method("Add", &[param("item", "T")], "bool"),
                method("Contains", &[param("item", "T")], "bool"),
                method("Remove", &[param("item", "T")], "bool"),
                method("UnionWith", &[param("other", "IEnumerable<T>")], "void"),
            ],
        )
    },
    TypeDef {
        fields: &["Count"],
        ..generic(
            "Queue`1",
            TypeKind::Class,
            &["T"],
            &[ctor(&[])],
            &[
                method("Enqueue", &[param("item", "T")], "void"),
                method("Dequeue", &[], "T"),
                method("Peek", &[], "T"),
            ],
        )
    },
    TypeDef {
        fields: &["Count"],
        ..generic(
            "Stack`1",
            TypeKind::Class,
            &["T"],
            &[ctor(&[])],
            &[
                method("Push", &[param("item", "T")], "void"),
                method("Pop", &[], "T"),
                method("Peek", &[], "T"),
            ],
        )
    },
    TypeDef {
        fields: &["Key", "Value"],
        ..generic(
            "KeyValuePair`2",
            TypeKind::Struct,
            &["TKey", "TValue"],
            &[ctor(&[param("key", "TKey"), param("value", "TValue")])],
            &[],
        )
    },
    generic(
        "IEnumerable`1",
        TypeKind::Interface,
        &["T"],
        &[],
        &[method("GetEnumerator", &[], "IEnumerator<T>")],
    ),
    generic("IEnumerator`1", TypeKind::Interface, &["T"], &[], &[method("MoveNext", &[], "bool")]),
    generic("IList`1", TypeKind::Interface, &["T"], &[], &[]),
];

pub const COLLECTIONS: HostModule = HostModule {
    name: "System.Collections.Generic",
    namespace: "System.Collections.Generic",
    types: TYPES,
    functions: &[],
    attributes: &[],
};
