//! Type registration: facade types into packed type records.

use hlslr_reflection::records::{TypeDesc, NONE};
use hlslr_reflection::reflection::{Pool, Reflection};
use hlslr_reflection::taxonomy::{VariableClass, VariableType};

use crate::ast::{AstType, AstTypeKind, Scalar, TemplateArg};

/// Recursively register a type, returning its id.
///
/// Constant-array wrappers become the element-count/array-id encoding,
/// `vector`/`matrix` specializations become Vector/Matrix classes (with
/// the row-major default applied when the type spells no qualifier),
/// resource templates become opaque Object types, and records register
/// their single base and their fields depth-first so every referenced
/// type precedes the referencing one. Structurally identical records
/// deduplicate to one id.
pub fn register_type(refl: &mut Reflection, original: &AstType, default_row_major: bool) -> u32 {
    // Unwrap constant arrays, outermost first.
    let mut dimensions = Vec::new();
    let mut flat: u32 = 1;
    let mut underlying = original;
    while let AstTypeKind::Array { element, extent } = &underlying.kind {
        dimensions.push(*extent);
        flat = flat
            .checked_mul(*extent)
            .unwrap_or_else(|| panic!("array size overflow: {}", original.name));
        underlying = element;
    }

    let name_id = if refl.has_symbol_info() {
        refl.intern_string(&underlying.name, Pool::Debug)
    } else {
        NONE
    };

    let array_id = refl.push_array(flat, &dimensions);
    let elements_or_array_id = if array_id != NONE {
        (1 << 31) | array_id
    } else if flat > 1 {
        flat
    } else {
        0
    };

    let mut class = VariableClass::Struct;
    let mut var_type = VariableType::Void;
    let mut rows: u8 = 0;
    let mut columns: u8 = 0;
    let mut base_class = NONE;
    let mut member_count: u32 = 0;
    let mut member_start: u32 = 0;

    match &underlying.kind {
        AstTypeKind::Builtin(scalar) => {
            class = VariableClass::Scalar;
            var_type = scalar.variable_type();
            rows = 1;
            columns = 1;
        }

        AstTypeKind::Template { template, args } => match template.as_str() {
            "vector" => {
                class = VariableClass::Vector;
                var_type = element_scalar(underlying).variable_type();
                rows = 1;
                columns = integral_arg(args, 0, &underlying.name);
            }
            "matrix" => {
                var_type = element_scalar(underlying).variable_type();
                columns = integral_arg(args, 0, &underlying.name);
                rows = integral_arg(args, 1, &underlying.name);

                let row_major = underlying.row_major.unwrap_or(default_row_major);
                if row_major {
                    class = VariableClass::MatrixRows;
                } else {
                    std::mem::swap(&mut rows, &mut columns);
                    class = VariableClass::MatrixColumns;
                }
            }
            _ => {
                class = VariableClass::Object;
                var_type = object_kind(template)
                    .unwrap_or_else(|| panic!("unsupported object type: {template}"));
            }
        },

        AstTypeKind::Record { bases, fields } => {
            assert!(
                bases.len() <= 1,
                "multiple base types are not supported in HLSL: {}",
                underlying.name
            );
            if let Some(base) = bases.first() {
                base_class = register_type(refl, base, default_row_major);
            }

            assert!(
                !fields.is_empty(),
                "record type has no fields: {}",
                underlying.name
            );

            // Register all field types first so the record's member run is
            // contiguous.
            let mut type_ids = Vec::with_capacity(fields.len());
            let mut name_ids = Vec::with_capacity(fields.len());
            for field in fields {
                name_ids.push(if refl.has_symbol_info() {
                    refl.intern_string(&field.name, Pool::Debug)
                } else {
                    0
                });
                type_ids.push(register_type(refl, &field.ty, default_row_major));
            }
            member_start = refl.push_members(&type_ids, &name_ids);
            member_count = fields.len() as u32;
        }

        AstTypeKind::Array { .. } => unreachable!("arrays unwrapped above"),
    }

    let desc = TypeDesc::new(
        base_class,
        elements_or_array_id,
        class,
        var_type,
        rows,
        columns,
        member_count,
        member_start,
    );
    refl.push_type(desc, name_id)
}

fn element_scalar(ty: &AstType) -> Scalar {
    match ty.template_type_arg().map(|t| &t.kind) {
        Some(AstTypeKind::Builtin(scalar)) => *scalar,
        _ => panic!("template element must be a builtin scalar: {}", ty.name),
    }
}

/// Nth integral template argument, as a component/row/column count.
fn integral_arg(args: &[TemplateArg], n: usize, name: &str) -> u8 {
    let value = args
        .iter()
        .filter_map(|arg| match arg {
            TemplateArg::Value(v) => Some(*v),
            TemplateArg::Type(_) => None,
        })
        .nth(n)
        .unwrap_or_else(|| panic!("missing template extent on {name}"));
    assert!(
        (1..=128).contains(&value),
        "template extent out of range on {name}: {value}"
    );
    value as u8
}

/// Opaque object kind for a resource template name.
fn object_kind(template: &str) -> Option<VariableType> {
    let kind = match template {
        "Texture1D" => VariableType::Texture1D,
        "Texture2D" => VariableType::Texture2D,
        "Texture3D" => VariableType::Texture3D,
        "TextureCube" => VariableType::TextureCube,
        "Texture1DArray" => VariableType::Texture1DArray,
        "Texture2DArray" => VariableType::Texture2DArray,
        "Texture2DMS" => VariableType::Texture2DMs,
        "Texture2DMSArray" => VariableType::Texture2DMsArray,
        "TextureCubeArray" => VariableType::TextureCubeArray,
        "RWTexture1D" => VariableType::RwTexture1D,
        "RWTexture1DArray" => VariableType::RwTexture1DArray,
        "RWTexture2D" => VariableType::RwTexture2D,
        "RWTexture2DArray" => VariableType::RwTexture2DArray,
        "RWTexture3D" => VariableType::RwTexture3D,
        "SamplerState" | "SamplerComparisonState" => VariableType::Sampler,
        "Buffer" => VariableType::Buffer,
        "RWBuffer" => VariableType::RwBuffer,
        "ConstantBuffer" => VariableType::CBuffer,
        "TextureBuffer" => VariableType::TBuffer,
        "ByteAddressBuffer" => VariableType::ByteAddressBuffer,
        "RWByteAddressBuffer" => VariableType::RwByteAddressBuffer,
        "StructuredBuffer" => VariableType::StructuredBuffer,
        "RWStructuredBuffer" => VariableType::RwStructuredBuffer,
        "AppendStructuredBuffer" => VariableType::AppendStructuredBuffer,
        "ConsumeStructuredBuffer" => VariableType::ConsumeStructuredBuffer,
        _ => return None,
    };
    Some(kind)
}
