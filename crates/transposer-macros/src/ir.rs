//! Intermediate representation for the derive macro.
//!
//! Sits between AST parsing and code generation.

use proc_macro2::Span;

/// A parsed parameter struct.
pub struct ParametersIR {
    /// The struct name (e.g., `TransposerParameters`)
    pub struct_name: syn::Ident,
    /// Generic parameters, if any
    pub generics: syn::Generics,
    /// All named fields, in declaration order
    pub fields: Vec<FieldIR>,
}

/// A single field in the parameter struct.
pub enum FieldIR {
    /// A field carrying `#[parameter(...)]`
    Parameter(ParameterFieldIR),
    /// Any other field, default-initialized
    Plain(syn::Ident),
}

/// A parameter field and its declarative attributes.
pub struct ParameterFieldIR {
    /// Field name (e.g., `transpose`)
    pub field_name: syn::Ident,
    /// String ID from `id = "..."`
    pub string_id: String,
    /// FNV-1a hash of the string ID
    pub hash_id: u32,
    pub name: String,
    pub short_name: Option<String>,
    pub default: i64,
    pub range: RangeSpec,
    pub kind: ParameterKind,
    /// Span for error reporting
    pub span: Span,
}

/// Inclusive integer range from `range = a..=b`.
pub struct RangeSpec {
    pub start: i64,
    pub end: i64,
    pub span: Span,
}

/// Display kind from `kind = "..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterKind {
    #[default]
    Integer,
    Semitones,
}

impl ParameterKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "integer" | "int" => Some(Self::Integer),
            "semitones" | "st" => Some(Self::Semitones),
            _ => None,
        }
    }
}

impl ParametersIR {
    /// Iterate over parameter fields, skipping plain ones.
    pub fn parameter_fields(&self) -> impl Iterator<Item = &ParameterFieldIR> {
        self.fields.iter().filter_map(|f| match f {
            FieldIR::Parameter(p) => Some(p),
            FieldIR::Plain(_) => None,
        })
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_fields().count()
    }
}

impl ParameterFieldIR {
    /// Name of the generated ID constant.
    ///
    /// E.g., `transpose` -> `PARAMETER_TRANSPOSE_ID`
    pub fn const_name(&self) -> syn::Ident {
        let name = self.field_name.to_string().to_uppercase();
        syn::Ident::new(&format!("PARAMETER_{}_ID", name), self.span)
    }
}
