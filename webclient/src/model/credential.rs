use std::collections::HashMap;

/// Credential field name.
/// e.g. "username", "password"
pub type CredName = &'static str;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CredFieldKind {
    Text,
    /// Read without echo.
    Password,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CredFieldMeta {
    pub name: CredName,
    pub kind: CredFieldKind,
}

/// Credential table.
/// e.g. `[ "username" => "Bob", "password" => "***" ]`
pub type CredMap = HashMap<CredName, String>;
