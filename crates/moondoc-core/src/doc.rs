//! Extractor document model
//!
//! The source extractor emits a JSON array of classes. Every record here
//! deserializes leniently: absent fields take their defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Execution context a member is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Realm {
    Client,
    Server,
    Plugin,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Client => "Client",
            Realm::Server => "Server",
            Realm::Plugin => "Plugin",
        }
    }
}

/// Whether a function is called with `.` or `:`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionType {
    Method,
    #[default]
    Static,
}

impl FunctionType {
    /// Call operator placed between class and function name
    pub fn operator(&self) -> char {
        match self {
            FunctionType::Method => ':',
            FunctionType::Static => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Deprecated {
    pub version: Option<String>,
    pub desc: Option<String>,
}

/// Location of the documented item in the source tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub line: usize,
    pub path: String,
}

/// An explicitly linked type defined outside the documented project
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalType {
    pub name: String,
    pub url: String,
}

/// Attributes shared by classes and all member kinds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberMeta {
    pub tags: Vec<String>,
    pub realm: Vec<Realm>,
    pub since: Option<String>,
    pub deprecated: Option<Deprecated>,
    pub private: bool,
    pub unreleased: bool,
    pub ignore: bool,
    pub source: Option<Source>,
    pub external_types: Vec<ExternalType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Param {
    pub name: String,
    pub desc: String,
    pub lua_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Return {
    pub desc: String,
    pub lua_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorEntry {
    pub lua_type: String,
    pub desc: String,
}

/// Interface field of a type definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    pub lua_type: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Function {
    pub name: String,
    pub desc: String,
    pub params: Vec<Param>,
    pub returns: Vec<Return>,
    pub function_type: FunctionType,
    pub errors: Vec<ErrorEntry>,
    pub yields: bool,
    #[serde(flatten)]
    pub meta: MemberMeta,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    pub desc: String,
    pub lua_type: String,
    pub readonly: bool,
    #[serde(flatten)]
    pub meta: MemberMeta,
}

/// A type alias (`lua_type` set) or an interface (`fields`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub name: String,
    pub desc: String,
    pub lua_type: Option<String>,
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub meta: MemberMeta,
}

/// A documented class: one page of the site
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LuaClass {
    pub name: String,
    pub desc: String,
    pub functions: Vec<Function>,
    pub properties: Vec<Property>,
    pub types: Vec<TypeDef>,
    #[serde(flatten)]
    pub meta: MemberMeta,
}

/// The three member sections of a class page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Types,
    Properties,
    Functions,
}

impl MemberKind {
    pub const ALL: [MemberKind; 3] = [
        MemberKind::Types,
        MemberKind::Properties,
        MemberKind::Functions,
    ];

    /// Section id, also the JSON key of the section
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Types => "types",
            MemberKind::Properties => "properties",
            MemberKind::Functions => "functions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MemberKind::Types => "Types",
            MemberKind::Properties => "Properties",
            MemberKind::Functions => "Functions",
        }
    }
}

/// Borrowed view of one class member of any kind
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Type(&'a TypeDef),
    Property(&'a Property),
    Function(&'a Function),
}

impl<'a> Member<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Member::Type(t) => &t.name,
            Member::Property(p) => &p.name,
            Member::Function(f) => &f.name,
        }
    }

    pub fn desc(&self) -> &'a str {
        match self {
            Member::Type(t) => &t.desc,
            Member::Property(p) => &p.desc,
            Member::Function(f) => &f.desc,
        }
    }

    pub fn meta(&self) -> &'a MemberMeta {
        match self {
            Member::Type(t) => &t.meta,
            Member::Property(p) => &p.meta,
            Member::Function(f) => &f.meta,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Type(_) => MemberKind::Types,
            Member::Property(_) => MemberKind::Properties,
            Member::Function(_) => MemberKind::Functions,
        }
    }

    pub fn yields(&self) -> bool {
        matches!(self, Member::Function(f) if f.yields)
    }

    pub fn readonly(&self) -> bool {
        matches!(self, Member::Property(p) if p.readonly)
    }
}

impl LuaClass {
    /// Members of one section in document order
    pub fn members(&self, kind: MemberKind) -> Vec<Member<'_>> {
        match kind {
            MemberKind::Types => self.types.iter().map(Member::Type).collect(),
            MemberKind::Properties => self.properties.iter().map(Member::Property).collect(),
            MemberKind::Functions => self.functions.iter().map(Member::Function).collect(),
        }
    }

    /// External types declared on the class and on any of its members
    pub fn external_types(&self) -> impl Iterator<Item = &ExternalType> {
        let members = MemberKind::ALL
            .into_iter()
            .flat_map(move |kind| self.members(kind))
            .flat_map(|member| member.meta().external_types.iter());
        self.meta.external_types.iter().chain(members)
    }
}

/// Parse the extractor output
pub fn parse_classes(json: &str) -> Result<Vec<LuaClass>> {
    Ok(serde_json::from_str(json)?)
}
