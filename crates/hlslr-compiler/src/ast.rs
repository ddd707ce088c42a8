//! Declaration and type facade consumed by the builder operations.
//!
//! The real compiler hands the builder its AST; this module models the
//! slice of it the reflection walk actually touches: builtin scalars,
//! template specializations (`vector<T,N>`, `matrix<T,C,R>`, resource
//! templates), record types with at most one base, constant-array
//! wrappers, and the declaration kinds that produce nodes.

use hlslr_reflection::reflection::{NodeAnnotation, SourceSpan};
use hlslr_reflection::taxonomy::{EnumElementType, VariableType};

/// Builtin scalar kinds, one per HLSL keyword.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scalar {
    Void,
    Bool,
    Int,
    UInt,
    UInt8,
    Float,
    Double,
    Half,
    Int16,
    UInt16,
    Int64,
    UInt64,
    Min10Float,
    Min16Float,
    Min12Int,
    Min16Int,
    Min16UInt,
}

impl Scalar {
    /// The reflected element kind; exactly one enumerator per builtin.
    pub fn variable_type(self) -> VariableType {
        match self {
            Self::Void => VariableType::Void,
            Self::Bool => VariableType::Bool,
            Self::Int => VariableType::Int,
            Self::UInt => VariableType::UInt,
            Self::UInt8 => VariableType::UInt8,
            Self::Float => VariableType::Float,
            Self::Double => VariableType::Double,
            Self::Half => VariableType::Float16,
            Self::Int16 => VariableType::Int16,
            Self::UInt16 => VariableType::UInt16,
            Self::Int64 => VariableType::Int64,
            Self::UInt64 => VariableType::UInt64,
            Self::Min10Float => VariableType::Min10Float,
            Self::Min16Float => VariableType::Min16Float,
            Self::Min12Int => VariableType::Min12Int,
            Self::Min16Int => VariableType::Min16Int,
            Self::Min16UInt => VariableType::Min16UInt,
        }
    }

    /// HLSL spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::UInt8 => "uint8_t",
            Self::Float => "float",
            Self::Double => "double",
            Self::Half => "half",
            Self::Int16 => "int16_t",
            Self::UInt16 => "uint16_t",
            Self::Int64 => "int64_t",
            Self::UInt64 => "uint64_t",
            Self::Min10Float => "min10float",
            Self::Min16Float => "min16float",
            Self::Min12Int => "min12int",
            Self::Min16Int => "min16int",
            Self::Min16UInt => "min16uint",
        }
    }

    /// Storage size in bytes (feeds the sample-count rule only).
    pub fn byte_size(self) -> u32 {
        match self {
            Self::Void => 0,
            Self::UInt8 => 1,
            Self::Half
            | Self::Int16
            | Self::UInt16
            | Self::Min10Float
            | Self::Min16Float
            | Self::Min12Int
            | Self::Min16Int
            | Self::Min16UInt => 2,
            Self::Double | Self::Int64 | Self::UInt64 => 8,
            Self::Bool | Self::Int | Self::UInt | Self::Float => 4,
        }
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::UInt | Self::UInt8 | Self::UInt16 | Self::UInt64 | Self::Min16UInt
        )
    }

    /// Storage type of an enum declared over this scalar.
    pub fn enum_element_type(self) -> EnumElementType {
        match self {
            Self::Int16 => EnumElementType::Int16,
            Self::UInt16 => EnumElementType::UInt16,
            Self::Int64 => EnumElementType::Int64,
            Self::UInt64 => EnumElementType::UInt64,
            other if other.is_unsigned() => EnumElementType::UInt,
            _ => EnumElementType::Int,
        }
    }
}

/// One template argument of a specialization.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TemplateArg {
    Type(AstType),
    Value(u64),
}

/// A qualified type as the frontend spells it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AstType {
    /// Local unqualified spelling (`float4`, `Globals`); recorded as the
    /// type name under symbol info.
    pub name: String,
    pub kind: AstTypeKind,
    /// Explicit `row_major`/`column_major` qualifier, if spelled.
    pub row_major: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AstTypeKind {
    Builtin(Scalar),
    /// A template specialization, identified by template name
    /// (`vector`, `matrix`, `Texture2D`, `StructuredBuffer`, …).
    /// Non-template object types (`SamplerState`) carry no arguments.
    Template {
        template: String,
        args: Vec<TemplateArg>,
    },
    Record {
        bases: Vec<AstType>,
        fields: Vec<AstField>,
    },
    /// One constant-array extent; multi-dimensional arrays nest.
    Array { element: Box<AstType>, extent: u32 },
}

/// A named field of a record type.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AstField {
    pub name: String,
    pub ty: AstType,
    pub span: Option<SourceSpan>,
}

impl AstField {
    pub fn new(name: impl Into<String>, ty: AstType) -> Self {
        Self {
            name: name.into(),
            ty,
            span: None,
        }
    }
}

impl AstType {
    pub fn builtin(scalar: Scalar) -> Self {
        Self {
            name: scalar.name().to_string(),
            kind: AstTypeKind::Builtin(scalar),
            row_major: None,
        }
    }

    /// `vector<T, N>`, spelled with the usual sugar (`float4`).
    pub fn vector(scalar: Scalar, components: u64) -> Self {
        Self {
            name: format!("{}{components}", scalar.name()),
            kind: AstTypeKind::Template {
                template: "vector".to_string(),
                args: vec![
                    TemplateArg::Type(Self::builtin(scalar)),
                    TemplateArg::Value(components),
                ],
            },
            row_major: None,
        }
    }

    /// `matrix<T, C, R>`, spelled with the usual sugar (`float4x3`).
    pub fn matrix(scalar: Scalar, columns: u64, rows: u64) -> Self {
        Self {
            name: format!("{}{columns}x{rows}", scalar.name()),
            kind: AstTypeKind::Template {
                template: "matrix".to_string(),
                args: vec![
                    TemplateArg::Type(Self::builtin(scalar)),
                    TemplateArg::Value(columns),
                    TemplateArg::Value(rows),
                ],
            },
            row_major: None,
        }
    }

    pub fn row_major(mut self) -> Self {
        self.row_major = Some(true);
        self
    }

    pub fn column_major(mut self) -> Self {
        self.row_major = Some(false);
        self
    }

    /// A one-argument resource template (`Texture2D<float4>`,
    /// `StructuredBuffer<Particle>`, `ConstantBuffer<Globals>`).
    pub fn resource(template: impl Into<String>, element: AstType) -> Self {
        let template = template.into();
        Self {
            name: template.clone(),
            kind: AstTypeKind::Template {
                template,
                args: vec![TemplateArg::Type(element)],
            },
            row_major: None,
        }
    }

    /// A zero-argument object type (`SamplerState`, `ByteAddressBuffer`,
    /// `RaytracingAccelerationStructure`).
    pub fn object(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: name.clone(),
            kind: AstTypeKind::Template {
                template: name,
                args: Vec::new(),
            },
            row_major: None,
        }
    }

    pub fn record(
        name: impl Into<String>,
        bases: Vec<AstType>,
        fields: Vec<AstField>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AstTypeKind::Record { bases, fields },
            row_major: None,
        }
    }

    /// Wrap in one constant-array extent (`T name[extent]`).
    pub fn array(element: AstType, extent: u32) -> Self {
        Self {
            name: element.name.clone(),
            kind: AstTypeKind::Array {
                element: Box::new(element),
                extent,
            },
            row_major: None,
        }
    }

    /// First `Type` template argument, for resource element extraction.
    pub fn template_type_arg(&self) -> Option<&AstType> {
        match &self.kind {
            AstTypeKind::Template { args, .. } => args.iter().find_map(|arg| match arg {
                TemplateArg::Type(ty) => Some(ty),
                TemplateArg::Value(_) => None,
            }),
            _ => None,
        }
    }

    /// Storage size in bytes (feeds the sample-count rule only): scalars
    /// per [`Scalar::byte_size`], vectors/matrices/arrays multiply,
    /// records sum their fields.
    pub fn byte_size(&self) -> u32 {
        match &self.kind {
            AstTypeKind::Builtin(scalar) => scalar.byte_size(),
            AstTypeKind::Template { template, args } => match template.as_str() {
                "vector" | "matrix" => {
                    let mut size = self
                        .template_type_arg()
                        .map(AstType::byte_size)
                        .unwrap_or(0);
                    for arg in args {
                        if let TemplateArg::Value(extent) = arg {
                            size *= *extent as u32;
                        }
                    }
                    size
                }
                _ => 0,
            },
            AstTypeKind::Record { fields, .. } => {
                fields.iter().map(|field| field.ty.byte_size()).sum()
            }
            AstTypeKind::Array { element, extent } => element.byte_size() * extent,
        }
    }
}

/// An explicit or rewriter-generated `register(...)` assignment. By the
/// time reflection runs, every resource declaration carries one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterAssignment {
    pub bind_point: u32,
    /// `None` falls back to the auto-bind space.
    pub space: Option<u32>,
}

impl RegisterAssignment {
    pub fn new(bind_point: u32) -> Self {
        Self {
            bind_point,
            space: None,
        }
    }

    pub fn with_space(bind_point: u32, space: u32) -> Self {
        Self {
            bind_point,
            space: Some(space),
        }
    }
}

/// A resource-typed global (`Texture2D<float4> tex[2] : register(t0);`).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResourceDecl {
    pub name: String,
    pub ty: AstType,
    /// Declaration-level array extents, outermost first.
    pub array: Vec<u32>,
    pub assignment: RegisterAssignment,
    pub annotations: Vec<NodeAnnotation>,
    pub span: Option<SourceSpan>,
}

/// cbuffer vs tbuffer block form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockKind {
    CBuffer,
    TBuffer,
}

/// A `cbuffer`/`tbuffer` block declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BufferBlock {
    pub name: String,
    pub kind: BlockKind,
    pub fields: Vec<AstField>,
    pub assignment: RegisterAssignment,
    pub annotations: Vec<NodeAnnotation>,
    pub span: Option<SourceSpan>,
}

/// A function declaration, with its body declarations when defined.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FunctionDecl {
    pub name: String,
    pub num_parameters: u32,
    pub has_return: bool,
    pub body: Option<Vec<AstDecl>>,
    pub annotations: Vec<NodeAnnotation>,
    pub span: Option<SourceSpan>,
}

/// An `enum`/`enum class` declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EnumDecl {
    pub name: String,
    pub element_type: Scalar,
    pub values: Vec<(String, i64)>,
    pub annotations: Vec<NodeAnnotation>,
    pub span: Option<SourceSpan>,
}

/// One declaration the walk visits.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AstDecl {
    Namespace {
        name: String,
        decls: Vec<AstDecl>,
        span: Option<SourceSpan>,
    },
    Buffer(BufferBlock),
    Resource(ResourceDecl),
    Function(FunctionDecl),
    Enum(EnumDecl),
    Typedef {
        name: String,
        span: Option<SourceSpan>,
    },
    Using {
        name: String,
        span: Option<SourceSpan>,
    },
}
