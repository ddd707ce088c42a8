//! Canonical enumerations of the reflection model.
//!
//! Discriminant values mirror the D3D reflection taxonomy so that packed
//! records stay bit-exact with the container format. Decoding always goes
//! through `from_*` constructors returning `Option`; raw bytes from a
//! container are never trusted to be valid discriminants.

/// Kind of a node in the reflection tree.
///
/// The kind selects which sibling table a node's `local_id` points into
/// (see [`NodeType::local_table`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum NodeType {
    Register = 0,
    Function = 1,
    Enum = 2,
    EnumValue = 3,
    Namespace = 4,
    Typedef = 5,
    Using = 6,
    /// `local_id` points to the type of the variable.
    Variable = 7,
}

/// Table a node's `local_id` indexes, per node kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocalTable {
    Registers,
    Functions,
    Enums,
    EnumValues,
    Types,
    /// Namespace/Typedef/Using carry no payload; `local_id` must be 0.
    Unused,
}

impl NodeType {
    /// Convert from raw discriminant (6-bit field in the node word).
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Register),
            1 => Some(Self::Function),
            2 => Some(Self::Enum),
            3 => Some(Self::EnumValue),
            4 => Some(Self::Namespace),
            5 => Some(Self::Typedef),
            6 => Some(Self::Using),
            7 => Some(Self::Variable),
            _ => None,
        }
    }

    /// Which table `local_id` indexes for this kind.
    pub fn local_table(self) -> LocalTable {
        match self {
            Self::Register => LocalTable::Registers,
            Self::Function => LocalTable::Functions,
            Self::Enum => LocalTable::Enums,
            Self::EnumValue => LocalTable::EnumValues,
            Self::Variable => LocalTable::Types,
            Self::Namespace | Self::Typedef | Self::Using => LocalTable::Unused,
        }
    }

    /// Display name used by the pretty printer.
    pub fn name(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Function => "Function",
            Self::Enum => "Enum",
            Self::EnumValue => "EnumValue",
            Self::Namespace => "Namespace",
            Self::Typedef => "Typedef",
            Self::Using => "Using",
            Self::Variable => "Variable",
        }
    }
}

/// Resource binding class of a register (`D3D_SHADER_INPUT_TYPE`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum ShaderInputType {
    CBuffer = 0,
    TBuffer = 1,
    Texture = 2,
    Sampler = 3,
    UavRwTyped = 4,
    Structured = 5,
    UavRwStructured = 6,
    ByteAddress = 7,
    UavRwByteAddress = 8,
    UavAppendStructured = 9,
    UavConsumeStructured = 10,
    UavRwStructuredWithCounter = 11,
    RtAccelerationStructure = 12,
    UavFeedbackTexture = 13,
}

impl ShaderInputType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::CBuffer),
            1 => Some(Self::TBuffer),
            2 => Some(Self::Texture),
            3 => Some(Self::Sampler),
            4 => Some(Self::UavRwTyped),
            5 => Some(Self::Structured),
            6 => Some(Self::UavRwStructured),
            7 => Some(Self::ByteAddress),
            8 => Some(Self::UavRwByteAddress),
            9 => Some(Self::UavAppendStructured),
            10 => Some(Self::UavConsumeStructured),
            11 => Some(Self::UavRwStructuredWithCounter),
            12 => Some(Self::RtAccelerationStructure),
            13 => Some(Self::UavFeedbackTexture),
            _ => None,
        }
    }

    /// Backing-buffer kind for this register class, if it has one.
    ///
    /// Registers of a kind returning `Some` must carry a `buffer_id`
    /// pointing at a [`CbufferType`]-matching buffer record.
    pub fn buffer_kind(self) -> Option<CbufferType> {
        match self {
            Self::CBuffer => Some(CbufferType::CBuffer),
            Self::TBuffer => Some(CbufferType::TBuffer),
            Self::Structured
            | Self::UavRwStructured
            | Self::UavAppendStructured
            | Self::UavConsumeStructured
            | Self::UavRwStructuredWithCounter => Some(CbufferType::ResourceBindInfo),
            _ => None,
        }
    }

    /// Structured kinds expose their element as a child named `$Element`;
    /// cbuffer/tbuffer reuse the register's own name.
    pub fn is_list_kind(self) -> bool {
        matches!(
            self,
            Self::Structured
                | Self::UavRwStructured
                | Self::UavAppendStructured
                | Self::UavConsumeStructured
                | Self::UavRwStructuredWithCounter
        )
    }

    /// Register-space letter for `register(<c><n>, space<m>)` display.
    pub fn space_char(self) -> char {
        match self {
            Self::UavRwTyped
            | Self::UavRwStructured
            | Self::UavRwByteAddress
            | Self::UavAppendStructured
            | Self::UavConsumeStructured
            | Self::UavRwStructuredWithCounter
            | Self::UavFeedbackTexture => 'u',
            Self::CBuffer => 'b',
            Self::Sampler => 's',
            _ => 't',
        }
    }
}

/// Register input flags (subset of `D3D_SHADER_INPUT_FLAGS` that fits the
/// 8-bit `user_flags` field).
pub mod input_flags {
    pub const USER_PACKED: u8 = 1;
    pub const COMPARISON_SAMPLER: u8 = 2;
    pub const TEXTURE_COMPONENT_0: u8 = 4;
    pub const TEXTURE_COMPONENT_1: u8 = 8;
    pub const TEXTURE_COMPONENTS: u8 = 12;
}

/// View dimension of a texture-like register (`D3D_SRV_DIMENSION`).
///
/// Array dimensions sit numerically one above their base dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum SrvDimension {
    Unknown = 0,
    Buffer = 1,
    Texture1D = 2,
    Texture1DArray = 3,
    Texture2D = 4,
    Texture2DArray = 5,
    Texture2DMs = 6,
    Texture2DMsArray = 7,
    Texture3D = 8,
    TextureCube = 9,
    TextureCubeArray = 10,
    BufferEx = 11,
}

impl SrvDimension {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Unknown),
            1 => Some(Self::Buffer),
            2 => Some(Self::Texture1D),
            3 => Some(Self::Texture1DArray),
            4 => Some(Self::Texture2D),
            5 => Some(Self::Texture2DArray),
            6 => Some(Self::Texture2DMs),
            7 => Some(Self::Texture2DMsArray),
            8 => Some(Self::Texture3D),
            9 => Some(Self::TextureCube),
            10 => Some(Self::TextureCubeArray),
            11 => Some(Self::BufferEx),
            _ => None,
        }
    }

    /// The `Array` variant of this dimension.
    pub fn to_array(self) -> Self {
        match self {
            Self::Texture1D => Self::Texture1DArray,
            Self::Texture2D => Self::Texture2DArray,
            Self::Texture2DMs => Self::Texture2DMsArray,
            Self::TextureCube => Self::TextureCubeArray,
            other => other,
        }
    }
}

/// Texel value category of a typed resource (`D3D_RESOURCE_RETURN_TYPE`).
///
/// `None` (0) is carried by registers that have no typed return value
/// (cbuffers, samplers, byte-address buffers).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum ReturnType {
    None = 0,
    UNorm = 1,
    SNorm = 2,
    SInt = 3,
    UInt = 4,
    Float = 5,
    Mixed = 6,
    Double = 7,
    Continued = 8,
}

impl ReturnType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            1 => Some(Self::UNorm),
            2 => Some(Self::SNorm),
            3 => Some(Self::SInt),
            4 => Some(Self::UInt),
            5 => Some(Self::Float),
            6 => Some(Self::Mixed),
            7 => Some(Self::Double),
            8 => Some(Self::Continued),
            _ => None,
        }
    }
}

/// Kind of a buffer record (`D3D_CBUFFER_TYPE`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum CbufferType {
    CBuffer = 0,
    TBuffer = 1,
    InterfacePointers = 2,
    ResourceBindInfo = 3,
}

impl CbufferType {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::CBuffer),
            1 => Some(Self::TBuffer),
            2 => Some(Self::InterfacePointers),
            3 => Some(Self::ResourceBindInfo),
            _ => None,
        }
    }
}

/// Shape class of a type record (`D3D_SHADER_VARIABLE_CLASS`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum VariableClass {
    Scalar = 0,
    Vector = 1,
    MatrixRows = 2,
    MatrixColumns = 3,
    Object = 4,
    Struct = 5,
    InterfaceClass = 6,
    InterfacePointer = 7,
    BitField = 8,
}

impl VariableClass {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Scalar),
            1 => Some(Self::Vector),
            2 => Some(Self::MatrixRows),
            3 => Some(Self::MatrixColumns),
            4 => Some(Self::Object),
            5 => Some(Self::Struct),
            6 => Some(Self::InterfaceClass),
            7 => Some(Self::InterfacePointer),
            8 => Some(Self::BitField),
            _ => None,
        }
    }

    pub fn is_matrix(self) -> bool {
        matches!(self, Self::MatrixRows | Self::MatrixColumns)
    }
}

/// Element or object kind of a type record (`D3D_SHADER_VARIABLE_TYPE`).
///
/// The numbering has gaps: this model only defines the enumerators the
/// HLSL surface can produce, at their original numeric positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum VariableType {
    Void = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    String = 4,
    Texture = 5,
    Texture1D = 6,
    Texture2D = 7,
    Texture3D = 8,
    TextureCube = 9,
    Sampler = 10,
    UInt = 19,
    UInt8 = 20,
    Buffer = 25,
    CBuffer = 26,
    TBuffer = 27,
    Texture1DArray = 28,
    Texture2DArray = 29,
    Texture2DMs = 32,
    Texture2DMsArray = 33,
    TextureCubeArray = 34,
    Double = 39,
    RwTexture1D = 40,
    RwTexture1DArray = 41,
    RwTexture2D = 42,
    RwTexture2DArray = 43,
    RwTexture3D = 44,
    RwBuffer = 45,
    ByteAddressBuffer = 46,
    RwByteAddressBuffer = 47,
    StructuredBuffer = 48,
    RwStructuredBuffer = 49,
    AppendStructuredBuffer = 50,
    ConsumeStructuredBuffer = 51,
    Min8Float = 52,
    Min10Float = 53,
    Min16Float = 54,
    Min12Int = 55,
    Min16Int = 56,
    Min16UInt = 57,
    Int16 = 58,
    UInt16 = 59,
    Float16 = 60,
    Int64 = 61,
    UInt64 = 62,
}

impl VariableType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Void),
            1 => Some(Self::Bool),
            2 => Some(Self::Int),
            3 => Some(Self::Float),
            4 => Some(Self::String),
            5 => Some(Self::Texture),
            6 => Some(Self::Texture1D),
            7 => Some(Self::Texture2D),
            8 => Some(Self::Texture3D),
            9 => Some(Self::TextureCube),
            10 => Some(Self::Sampler),
            19 => Some(Self::UInt),
            20 => Some(Self::UInt8),
            25 => Some(Self::Buffer),
            26 => Some(Self::CBuffer),
            27 => Some(Self::TBuffer),
            28 => Some(Self::Texture1DArray),
            29 => Some(Self::Texture2DArray),
            32 => Some(Self::Texture2DMs),
            33 => Some(Self::Texture2DMsArray),
            34 => Some(Self::TextureCubeArray),
            39 => Some(Self::Double),
            40 => Some(Self::RwTexture1D),
            41 => Some(Self::RwTexture1DArray),
            42 => Some(Self::RwTexture2D),
            43 => Some(Self::RwTexture2DArray),
            44 => Some(Self::RwTexture3D),
            45 => Some(Self::RwBuffer),
            46 => Some(Self::ByteAddressBuffer),
            47 => Some(Self::RwByteAddressBuffer),
            48 => Some(Self::StructuredBuffer),
            49 => Some(Self::RwStructuredBuffer),
            50 => Some(Self::AppendStructuredBuffer),
            51 => Some(Self::ConsumeStructuredBuffer),
            52 => Some(Self::Min8Float),
            53 => Some(Self::Min10Float),
            54 => Some(Self::Min16Float),
            55 => Some(Self::Min12Int),
            56 => Some(Self::Min16Int),
            57 => Some(Self::Min16UInt),
            58 => Some(Self::Int16),
            59 => Some(Self::UInt16),
            60 => Some(Self::Float16),
            61 => Some(Self::Int64),
            62 => Some(Self::UInt64),
            _ => None,
        }
    }

    /// Numeric element kinds valid for scalar/vector/matrix classes.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Int
                | Self::UInt
                | Self::Float
                | Self::Double
                | Self::Min8Float
                | Self::Min10Float
                | Self::Min16Float
                | Self::Min12Int
                | Self::Min16Int
                | Self::Min16UInt
                | Self::Int16
                | Self::UInt16
                | Self::Float16
                | Self::Int64
                | Self::UInt64
        )
    }

    /// Opaque object kinds valid for the Object class.
    pub fn is_object(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Texture1D
                | Self::Texture2D
                | Self::Texture3D
                | Self::TextureCube
                | Self::Sampler
                | Self::Buffer
                | Self::CBuffer
                | Self::TBuffer
                | Self::Texture1DArray
                | Self::Texture2DArray
                | Self::Texture2DMs
                | Self::Texture2DMsArray
                | Self::TextureCubeArray
                | Self::RwTexture1D
                | Self::RwTexture1DArray
                | Self::RwTexture2D
                | Self::RwTexture2DArray
                | Self::RwTexture3D
                | Self::RwBuffer
                | Self::ByteAddressBuffer
                | Self::RwByteAddressBuffer
                | Self::StructuredBuffer
                | Self::RwStructuredBuffer
                | Self::AppendStructuredBuffer
                | Self::ConsumeStructuredBuffer
        )
    }

    /// HLSL spelling of the kind, where one exists.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Void => Some("void"),
            Self::Bool => Some("bool"),
            Self::Int => Some("int"),
            Self::Float => Some("float"),
            Self::String => Some("string"),
            Self::Texture1D => Some("Texture1D"),
            Self::Texture2D => Some("Texture2D"),
            Self::Texture3D => Some("Texture3D"),
            Self::TextureCube => Some("TextureCube"),
            Self::Sampler => Some("SamplerState"),
            Self::UInt => Some("uint"),
            Self::UInt8 => Some("uint8_t"),
            Self::Buffer => Some("Buffer"),
            Self::CBuffer => Some("ConstantBuffer"),
            Self::TBuffer => Some("TextureBuffer"),
            Self::Texture1DArray => Some("Texture1DArray"),
            Self::Texture2DArray => Some("Texture2DArray"),
            Self::Texture2DMs => Some("Texture2DMS"),
            Self::Texture2DMsArray => Some("Texture2DMSArray"),
            Self::TextureCubeArray => Some("TextureCubeArray"),
            Self::Double => Some("double"),
            Self::RwTexture1D => Some("RWTexture1D"),
            Self::RwTexture1DArray => Some("RWTexture1DArray"),
            Self::RwTexture2D => Some("RWTexture2D"),
            Self::RwTexture2DArray => Some("RWTexture2DArray"),
            Self::RwTexture3D => Some("RWTexture3D"),
            Self::RwBuffer => Some("RWBuffer"),
            Self::ByteAddressBuffer => Some("ByteAddressBuffer"),
            Self::RwByteAddressBuffer => Some("RWByteAddressBuffer"),
            Self::StructuredBuffer => Some("StructuredBuffer"),
            Self::RwStructuredBuffer => Some("RWStructuredBuffer"),
            Self::AppendStructuredBuffer => Some("AppendStructuredBuffer"),
            Self::ConsumeStructuredBuffer => Some("ConsumeStructuredBuffer"),
            Self::Min8Float => Some("min8float"),
            Self::Min10Float => Some("min10float"),
            Self::Min16Float => Some("min16float"),
            Self::Min12Int => Some("min12int"),
            Self::Min16Int => Some("min16int"),
            Self::Min16UInt => Some("min16uint"),
            Self::Int16 => Some("int16_t"),
            Self::UInt16 => Some("uint16_t"),
            Self::Float16 => Some("float16_t"),
            Self::Int64 => Some("int64_t"),
            Self::UInt64 => Some("uint64_t"),
            _ => None,
        }
    }
}

/// Storage type of an enum declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum EnumElementType {
    UInt = 0,
    Int = 1,
    UInt64 = 2,
    Int64 = 3,
    UInt16 = 4,
    Int16 = 5,
}

impl EnumElementType {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::UInt),
            1 => Some(Self::Int),
            2 => Some(Self::UInt64),
            3 => Some(Self::Int64),
            4 => Some(Self::UInt16),
            5 => Some(Self::Int16),
            _ => None,
        }
    }

    /// HLSL spelling of the storage type.
    pub fn name(self) -> &'static str {
        match self {
            Self::UInt => "uint",
            Self::Int => "int",
            Self::UInt64 => "uint64_t",
            Self::Int64 => "int64_t",
            Self::UInt16 => "uint16_t",
            Self::Int16 => "int16_t",
        }
    }
}
