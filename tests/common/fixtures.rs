// Test fixtures for integration testing

/// Two books by Knut Hamsun, as a snapshot file would hold them
#[allow(dead_code)] // Used in integration tests
pub const BOOKS_SNAPSHOT: &str = concat!(
    r#"[{"ID":1,"Data":{"Author":"Knut Hamsun","Title":"Sult","Issued":1890}},"#,
    r#"{"ID":2,"Data":{"Author":"Knut Hamsun","Title":"Pan","Issued":1894}}]"#
);

/// The same two books as separate payloads
#[allow(dead_code)] // Used in integration tests
pub fn hamsun_books() -> Vec<&'static str> {
    vec![
        r#"{"Author":"Knut Hamsun","Title":"Sult","Issued":1890}"#,
        r#"{"Author":"Knut Hamsun","Title":"Pan","Issued":1894}"#,
    ]
}

/// People records whose Department refers to a department document
#[allow(dead_code)] // Used in integration tests
pub fn people() -> Vec<&'static str> {
    vec![
        r#"{"Name":"Mr. Q","Department":1,"Role":"boss","Info":"likes tea"}"#,
        r#"{"Name":"bill","Department":2,"Role":"clerk","Info":""}"#,
        r#"{"Name":"Mr. c","Department":2,"Role":"clerk","Info":"new"}"#,
    ]
}

/// Department snapshot resolving the ids used by [`people`]
#[allow(dead_code)] // Used in integration tests
pub const DEPARTMENTS_SNAPSHOT: &str =
    r#"[{"ID":1,"Data":{"Name":"main","Parent":0}},{"ID":2,"Data":{"Name":"xyz","Parent":1}}]"#;
