use super::*;

#[test]
fn node_type_from_u8_valid() {
    assert_eq!(NodeType::from_u8(0), Some(NodeType::Register));
    assert_eq!(NodeType::from_u8(1), Some(NodeType::Function));
    assert_eq!(NodeType::from_u8(2), Some(NodeType::Enum));
    assert_eq!(NodeType::from_u8(3), Some(NodeType::EnumValue));
    assert_eq!(NodeType::from_u8(4), Some(NodeType::Namespace));
    assert_eq!(NodeType::from_u8(5), Some(NodeType::Typedef));
    assert_eq!(NodeType::from_u8(6), Some(NodeType::Using));
    assert_eq!(NodeType::from_u8(7), Some(NodeType::Variable));
}

#[test]
fn node_type_from_u8_invalid() {
    assert_eq!(NodeType::from_u8(8), None);
    assert_eq!(NodeType::from_u8(63), None);
}

#[test]
fn local_table_mapping() {
    assert_eq!(NodeType::Register.local_table(), LocalTable::Registers);
    assert_eq!(NodeType::Function.local_table(), LocalTable::Functions);
    assert_eq!(NodeType::Enum.local_table(), LocalTable::Enums);
    assert_eq!(NodeType::EnumValue.local_table(), LocalTable::EnumValues);
    assert_eq!(NodeType::Variable.local_table(), LocalTable::Types);
    assert_eq!(NodeType::Namespace.local_table(), LocalTable::Unused);
    assert_eq!(NodeType::Typedef.local_table(), LocalTable::Unused);
    assert_eq!(NodeType::Using.local_table(), LocalTable::Unused);
}

#[test]
fn buffer_kind_per_input_type() {
    assert_eq!(
        ShaderInputType::CBuffer.buffer_kind(),
        Some(CbufferType::CBuffer)
    );
    assert_eq!(
        ShaderInputType::TBuffer.buffer_kind(),
        Some(CbufferType::TBuffer)
    );
    for kind in [
        ShaderInputType::Structured,
        ShaderInputType::UavRwStructured,
        ShaderInputType::UavAppendStructured,
        ShaderInputType::UavConsumeStructured,
        ShaderInputType::UavRwStructuredWithCounter,
    ] {
        assert_eq!(kind.buffer_kind(), Some(CbufferType::ResourceBindInfo));
        assert!(kind.is_list_kind());
    }
    assert_eq!(ShaderInputType::Texture.buffer_kind(), None);
    assert_eq!(ShaderInputType::Sampler.buffer_kind(), None);
    assert_eq!(ShaderInputType::UavRwTyped.buffer_kind(), None);
    assert!(!ShaderInputType::CBuffer.is_list_kind());
}

#[test]
fn space_char_per_input_type() {
    assert_eq!(ShaderInputType::CBuffer.space_char(), 'b');
    assert_eq!(ShaderInputType::Sampler.space_char(), 's');
    assert_eq!(ShaderInputType::Texture.space_char(), 't');
    assert_eq!(ShaderInputType::Structured.space_char(), 't');
    assert_eq!(ShaderInputType::UavRwTyped.space_char(), 'u');
    assert_eq!(ShaderInputType::UavFeedbackTexture.space_char(), 'u');
}

#[test]
fn srv_dimension_array_is_one_above_base() {
    assert_eq!(SrvDimension::Texture1D.to_array(), SrvDimension::Texture1DArray);
    assert_eq!(SrvDimension::Texture2D.to_array(), SrvDimension::Texture2DArray);
    assert_eq!(
        SrvDimension::Texture2DMs.to_array(),
        SrvDimension::Texture2DMsArray
    );
    assert_eq!(
        SrvDimension::TextureCube.to_array(),
        SrvDimension::TextureCubeArray
    );
    for (base, array) in [
        (SrvDimension::Texture1D, SrvDimension::Texture1DArray),
        (SrvDimension::Texture2D, SrvDimension::Texture2DArray),
        (SrvDimension::Texture2DMs, SrvDimension::Texture2DMsArray),
        (SrvDimension::TextureCube, SrvDimension::TextureCubeArray),
    ] {
        assert_eq!(base as u8 + 1, array as u8);
    }
}

#[test]
fn variable_type_discriminants_match_d3d() {
    assert_eq!(VariableType::Void as u8, 0);
    assert_eq!(VariableType::Float as u8, 3);
    assert_eq!(VariableType::UInt as u8, 19);
    assert_eq!(VariableType::Buffer as u8, 25);
    assert_eq!(VariableType::Double as u8, 39);
    assert_eq!(VariableType::StructuredBuffer as u8, 48);
    assert_eq!(VariableType::Float16 as u8, 60);
    assert_eq!(VariableType::UInt64 as u8, 62);
}

#[test]
fn variable_type_from_u8_gaps() {
    // The numbering has holes; unused positions decode to nothing.
    assert_eq!(VariableType::from_u8(22), None);
    assert_eq!(VariableType::from_u8(63), None);
    assert_eq!(VariableType::from_u8(35), None);
    assert_eq!(VariableType::from_u8(3), Some(VariableType::Float));
}

#[test]
fn scalar_and_object_kinds_are_disjoint() {
    for v in 0..=255u8 {
        if let Some(ty) = VariableType::from_u8(v) {
            assert!(
                !(ty.is_scalar() && ty.is_object()),
                "{ty:?} is both scalar and object"
            );
        }
    }
    assert!(VariableType::Float.is_scalar());
    assert!(VariableType::Min16UInt.is_scalar());
    assert!(!VariableType::Void.is_scalar());
    assert!(VariableType::Texture2D.is_object());
    assert!(VariableType::String.is_object());
    assert!(!VariableType::Void.is_object());
}

#[test]
fn enum_element_type_names() {
    assert_eq!(EnumElementType::UInt.name(), "uint");
    assert_eq!(EnumElementType::Int16.name(), "int16_t");
    assert_eq!(EnumElementType::from_u32(4), Some(EnumElementType::UInt16));
    assert_eq!(EnumElementType::from_u32(6), None);
}
