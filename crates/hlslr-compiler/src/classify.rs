//! Resource classification by template-specialization name.
//!
//! Turns a resource-typed declaration's type into the register fields:
//! input kind, view dimension, texel return type, component flags and
//! sample count. Matching is on the spelled template name with the
//! `RasterizerOrdered`/`RW`/`Feedback` prefixes and the `Array` suffix
//! stripped, mirroring how the HLSL surface names these types.

use hlslr_reflection::taxonomy::{input_flags, ReturnType, ShaderInputType, SrvDimension};

use crate::ast::{AstType, AstTypeKind, Scalar, TemplateArg};

/// `num_samples` for resources where a sample count is not a static
/// property (non-MS textures, acceleration structures).
pub const SAMPLE_COUNT_NOT_APPLICABLE: u32 = u32::MAX;

/// Register-level classification of one resource type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterTypeInfo {
    pub input_type: ShaderInputType,
    pub flags: u8,
    pub dimension: SrvDimension,
    pub return_type: ReturnType,
    pub sample_count: u32,
}

/// Classify a resource-typed declaration.
///
/// # Panics
/// Panics on a type that is not an HLSL resource (producer error).
pub fn classify_resource(ty: &AstType) -> RegisterTypeInfo {
    let AstTypeKind::Template { template, args } = &ty.kind else {
        panic!("not a resource type: {}", ty.name);
    };

    let mut name = template.as_str();
    if let Some(stripped) = name.strip_prefix("RasterizerOrdered") {
        name = stripped;
    }

    if name == "SamplerState" || name == "SamplerComparisonState" {
        return RegisterTypeInfo {
            input_type: ShaderInputType::Sampler,
            flags: if name == "SamplerComparisonState" {
                input_flags::COMPARISON_SAMPLER
            } else {
                0
            },
            dimension: SrvDimension::Unknown,
            return_type: ReturnType::None,
            sample_count: 0,
        };
    }

    // One-type-argument buffer templates carry their element's byte size.
    let element_size = if args.len() == 1 {
        ty.template_type_arg().map(AstType::byte_size).unwrap_or(0)
    } else {
        0
    };

    let buffer_info = |input_type| RegisterTypeInfo {
        input_type,
        flags: 0,
        dimension: SrvDimension::Unknown,
        return_type: ReturnType::None,
        sample_count: element_size,
    };

    match name {
        "AppendStructuredBuffer" => {
            return buffer_info(ShaderInputType::UavAppendStructured);
        }
        "ConsumeStructuredBuffer" => {
            return buffer_info(ShaderInputType::UavConsumeStructured);
        }
        "RaytracingAccelerationStructure" => {
            return RegisterTypeInfo {
                sample_count: SAMPLE_COUNT_NOT_APPLICABLE,
                ..buffer_info(ShaderInputType::RtAccelerationStructure)
            };
        }
        "TextureBuffer" => return buffer_info(ShaderInputType::TBuffer),
        "ConstantBuffer" => return buffer_info(ShaderInputType::CBuffer),
        _ => {}
    }

    let is_write = name.starts_with("RW");
    if is_write {
        name = &name[2..];
    }

    match name {
        "StructuredBuffer" => {
            return buffer_info(if is_write {
                ShaderInputType::UavRwStructured
            } else {
                ShaderInputType::Structured
            });
        }
        "ByteAddressBuffer" => {
            return RegisterTypeInfo {
                sample_count: 0,
                ..buffer_info(if is_write {
                    ShaderInputType::UavRwByteAddress
                } else {
                    ShaderInputType::ByteAddress
                })
            };
        }
        _ => {}
    }

    classify_texture(ty, name, is_write)
}

fn classify_texture(ty: &AstType, type_name: &str, is_write: bool) -> RegisterTypeInfo {
    let mut info = RegisterTypeInfo {
        input_type: if is_write {
            ShaderInputType::UavRwTyped
        } else {
            ShaderInputType::Texture
        },
        flags: 0,
        dimension: SrvDimension::Unknown,
        return_type: ReturnType::None,
        sample_count: SAMPLE_COUNT_NOT_APPLICABLE,
    };

    // The texel type is a builtin or vector<T, N>.
    let element = ty
        .template_type_arg()
        .unwrap_or_else(|| panic!("texture template missing texel type: {}", ty.name));
    let (scalar, components) = texel_shape(element);

    info.return_type = texel_return_type(scalar);
    info.flags = match components {
        2 => input_flags::TEXTURE_COMPONENT_0,
        3 => input_flags::TEXTURE_COMPONENT_1,
        4 => input_flags::TEXTURE_COMPONENTS,
        _ => 0,
    };

    if type_name == "Buffer" {
        info.dimension = SrvDimension::Buffer;
        return info;
    }

    let mut name = type_name;
    if let Some(stripped) = name.strip_prefix("Feedback") {
        name = stripped;
        info.input_type = ShaderInputType::UavFeedbackTexture;
    }

    let is_array = name.ends_with("Array");
    if is_array {
        name = &name[..name.len() - "Array".len()];
    }

    info.dimension = match name {
        "Texture1D" => SrvDimension::Texture1D,
        "Texture2D" => SrvDimension::Texture2D,
        "Texture3D" => SrvDimension::Texture3D,
        "TextureCube" => SrvDimension::TextureCube,
        "Texture2DMS" => {
            info.sample_count = 0;
            SrvDimension::Texture2DMs
        }
        _ => panic!("unsupported resource type: {type_name}"),
    };

    if is_array {
        info.dimension = info.dimension.to_array();
    }

    info
}

/// Scalar kind and component count of a texel type.
fn texel_shape(element: &AstType) -> (Scalar, u64) {
    match &element.kind {
        AstTypeKind::Builtin(scalar) => (*scalar, 1),
        AstTypeKind::Template { template, args } if template == "vector" => {
            let scalar = match element.template_type_arg().map(|t| &t.kind) {
                Some(AstTypeKind::Builtin(scalar)) => *scalar,
                _ => panic!("vector texel must have a builtin element"),
            };
            let components = args
                .iter()
                .find_map(|arg| match arg {
                    TemplateArg::Value(n) => Some(*n),
                    _ => None,
                })
                .unwrap_or_else(|| panic!("vector texel missing component count"));
            (scalar, components)
        }
        _ => panic!("unsupported texel type: {}", element.name),
    }
}

fn texel_return_type(scalar: Scalar) -> ReturnType {
    match scalar {
        Scalar::Double => ReturnType::Double,
        Scalar::Float | Scalar::Half | Scalar::Min10Float | Scalar::Min16Float => ReturnType::Float,
        Scalar::Int64 | Scalar::UInt64 | Scalar::Void => ReturnType::Mixed,
        scalar if scalar.is_unsigned() => ReturnType::UInt,
        _ => ReturnType::SInt,
    }
}
