//! End-to-end walks through the public surface: build from facade
//! declarations, dump, load, validate, strip, and resolve names.

use hlslr_compiler::{
    reflect, AstDecl, AstField, AstType, BlockKind, BufferBlock, EnumDecl, ReflectOptions,
    RegisterAssignment, ResourceDecl, Scalar, SAMPLE_COUNT_NOT_APPLICABLE,
};
use hlslr_reflection::taxonomy::{
    input_flags, CbufferType, EnumElementType, NodeType, ReturnType, ShaderInputType, SrvDimension,
    VariableClass, VariableType,
};
use hlslr_reflection::{validate, Features, ReflectError, Reflection};

fn options() -> ReflectOptions {
    ReflectOptions::default()
}

/// cbuffer Globals : register(b0, space0) { float4 g_color; }
fn globals_cbuffer() -> AstDecl {
    AstDecl::Buffer(BufferBlock {
        name: "Globals".into(),
        kind: BlockKind::CBuffer,
        fields: vec![AstField::new("g_color", AstType::vector(Scalar::Float, 4))],
        assignment: RegisterAssignment::with_space(0, 0),
        annotations: vec![],
        span: None,
    })
}

/// Texture2D<float4> tex[2][3] : register(t5, space2);
fn texture_array() -> AstDecl {
    AstDecl::Resource(ResourceDecl {
        name: "tex".into(),
        ty: AstType::resource("Texture2D", AstType::vector(Scalar::Float, 4)),
        array: vec![2, 3],
        assignment: RegisterAssignment::with_space(5, 2),
        annotations: vec![],
        span: None,
    })
}

/// enum class Mode : uint16_t { A = 1, B = 2, C = 7 };
fn mode_enum() -> AstDecl {
    AstDecl::Enum(EnumDecl {
        name: "Mode".into(),
        element_type: Scalar::UInt16,
        values: vec![("A".into(), 1), ("B".into(), 2), ("C".into(), 7)],
        annotations: vec![],
        span: None,
    })
}

#[test]
fn scenario_a_minimal_cbuffer() {
    let refl = reflect(&[globals_cbuffer()], &options());
    validate(&refl).unwrap();

    assert_eq!(refl.nodes().len(), 3);
    assert_eq!(refl.nodes()[0].node_type(), NodeType::Namespace);
    assert_eq!(refl.nodes()[1].node_type(), NodeType::Register);
    assert_eq!(refl.nodes()[2].node_type(), NodeType::Variable);
    assert_eq!(refl.node_name(1), Some("Globals"));
    assert_eq!(refl.node_name(2), Some("g_color"));

    assert_eq!(refl.registers().len(), 1);
    let reg = &refl.registers()[0];
    assert_eq!(reg.input_type(), ShaderInputType::CBuffer);
    assert_eq!(reg.bind_point(), 0);
    assert_eq!(reg.space(), 0);
    assert_eq!(reg.bind_count(), 1);
    assert_eq!(reg.buffer_id(), 0);
    assert_eq!(reg.user_flags(), input_flags::USER_PACKED);

    assert_eq!(refl.buffers().len(), 1);
    assert_eq!(refl.buffers()[0].cbuffer_type(), CbufferType::CBuffer);
    assert_eq!(refl.buffers()[0].node_id(), 1);

    let vector = refl
        .types()
        .iter()
        .find(|ty| ty.class_raw() == VariableClass::Vector as u8)
        .expect("float4 vector type");
    assert_eq!(vector.var_type(), Some(VariableType::Float));
    assert_eq!(vector.columns(), 4);

    let block_struct = refl
        .types()
        .iter()
        .find(|ty| ty.class_raw() == VariableClass::Struct as u8)
        .expect("block struct type");
    assert_eq!(block_struct.member_count(), 1);
}

#[test]
fn scenario_b_texture_array() {
    let refl = reflect(&[texture_array()], &options());
    validate(&refl).unwrap();

    let reg = &refl.registers()[0];
    assert_eq!(reg.input_type(), ShaderInputType::Texture);
    assert_eq!(reg.dimension(), SrvDimension::Texture2D);
    assert_eq!(reg.return_type(), ReturnType::Float);
    assert_eq!(reg.bind_count(), 6);
    assert_eq!(reg.bind_point(), 5);
    assert_eq!(reg.space(), 2);
    assert_eq!(reg.num_samples(), SAMPLE_COUNT_NOT_APPLICABLE);

    let array = &refl.arrays()[reg.array_id().unwrap() as usize];
    assert_eq!(array.rank(), 2);
    let start = array.size_start() as usize;
    assert_eq!(&refl.array_sizes()[start..start + 2], &[2, 3]);
}

#[test]
fn scenario_c_enum() {
    let refl = reflect(&[mode_enum()], &options());
    validate(&refl).unwrap();

    assert_eq!(refl.enums().len(), 1);
    let desc = &refl.enums()[0];
    assert_eq!(desc.element_type(), EnumElementType::UInt16);

    let node = &refl.nodes()[desc.node_id() as usize];
    assert_eq!(node.node_type(), NodeType::Enum);
    assert_eq!(node.child_count(), 3);

    let values: Vec<i64> = refl.enum_values().iter().map(|v| v.value()).collect();
    assert_eq!(values, vec![1, 2, 7]);
}

#[test]
fn scenario_d_round_trip_and_trailing_bytes() {
    let refl = reflect(&[globals_cbuffer(), texture_array(), mode_enum()], &options());
    validate(&refl).unwrap();

    let bytes = refl.dump();
    let loaded = Reflection::from_bytes(&bytes, false).unwrap();
    assert_eq!(loaded, refl);

    let mut corrupt = bytes.clone();
    corrupt.push(0xAB);
    let err = Reflection::from_bytes(&corrupt, false).unwrap_err();
    assert!(matches!(err, ReflectError::TrailingBytes { .. }), "{err}");
}

#[test]
fn scenario_e_strip() {
    let original = reflect(&[globals_cbuffer()], &options());
    let mut stripped = original.clone();
    stripped.strip_symbols();

    assert!(stripped.strings().is_empty());
    assert!(stripped.sources().is_empty());
    assert!(stripped.node_symbols().is_empty());
    assert!(stripped.member_name_ids().is_empty());
    assert!(stripped.type_name_ids().is_empty());
    assert!(!stripped.features().contains(Features::SYMBOL_INFO));

    assert!(original.is_same_non_debug(&stripped));
    assert_ne!(original, stripped);

    // Stripping is idempotent.
    let mut twice = stripped.clone();
    twice.strip_symbols();
    assert_eq!(twice, stripped);

    // A stripped instance round-trips as itself.
    let reloaded = Reflection::from_bytes(&stripped.dump(), false).unwrap();
    assert_eq!(reloaded, stripped);
    validate(&reloaded).unwrap();
}

#[test]
fn scenario_f_name_lookup() {
    // namespace A { namespace B { cbuffer C { float4 v; } } }
    let decls = [AstDecl::Namespace {
        name: "A".into(),
        decls: vec![AstDecl::Namespace {
            name: "B".into(),
            decls: vec![AstDecl::Buffer(BufferBlock {
                name: "C".into(),
                kind: BlockKind::CBuffer,
                fields: vec![AstField::new("v", AstType::vector(Scalar::Float, 4))],
                assignment: RegisterAssignment::new(0),
                annotations: vec![],
                span: None,
            })],
            span: None,
        }],
        span: None,
    }];
    let mut refl = reflect(&decls, &options());
    assert!(refl.generate_name_lookup_table());

    let lookup = refl.name_lookup().unwrap();
    let register_node = *lookup
        .fully_resolved_to_node_id
        .get("A::B::C")
        .expect("register resolves");
    assert_eq!(
        refl.nodes()[register_node as usize].node_type(),
        NodeType::Register
    );

    let member = *lookup
        .fully_resolved_to_member_id
        .get("A::B::C.v")
        .expect("member resolves");
    let block_struct = refl
        .types()
        .iter()
        .find(|ty| ty.class_raw() == VariableClass::Struct as u8)
        .unwrap();
    assert_eq!(member, block_struct.member_start());

    // The node map and reverse vector agree on every entry.
    for (name, &node_id) in &lookup.fully_resolved_to_node_id {
        assert_eq!(&lookup.node_id_to_fully_resolved[node_id as usize], name);
    }
}

#[test]
fn structured_buffer_element_resolves_members() {
    // RWStructuredBuffer<Particle> particles : register(u0);
    let particle = AstType::record(
        "Particle",
        vec![],
        vec![
            AstField::new("position", AstType::vector(Scalar::Float, 3)),
            AstField::new("life", AstType::builtin(Scalar::Float)),
        ],
    );
    let decls = [AstDecl::Resource(ResourceDecl {
        name: "particles".into(),
        ty: AstType::resource("RWStructuredBuffer", particle),
        array: vec![],
        assignment: RegisterAssignment::new(0),
        annotations: vec![],
        span: None,
    })];
    let mut refl = reflect(&decls, &options());
    validate(&refl).unwrap();

    assert_eq!(
        refl.registers()[0].input_type(),
        ShaderInputType::UavRwStructured
    );
    assert_eq!(
        refl.buffers()[0].cbuffer_type(),
        CbufferType::ResourceBindInfo
    );
    // The element child carries the record type.
    assert_eq!(refl.node_name(2), Some("$Element"));

    refl.generate_name_lookup_table();
    let lookup = refl.name_lookup().unwrap();
    assert!(lookup
        .fully_resolved_to_node_id
        .contains_key("particles.$Element"));
    assert!(lookup
        .fully_resolved_to_member_id
        .contains_key("particles.$Element.position"));
    assert!(lookup
        .fully_resolved_to_member_id
        .contains_key("particles.$Element.life"));
}

#[test]
fn constant_buffer_template_names_child_after_register() {
    // ConstantBuffer<Globals> globals : register(b1);
    let record = AstType::record(
        "Globals",
        vec![],
        vec![AstField::new("tint", AstType::vector(Scalar::Float, 4))],
    );
    let decls = [AstDecl::Resource(ResourceDecl {
        name: "globals".into(),
        ty: AstType::resource("ConstantBuffer", record),
        array: vec![],
        assignment: RegisterAssignment::new(1),
        annotations: vec![],
        span: None,
    })];
    let refl = reflect(&decls, &options());
    validate(&refl).unwrap();

    assert_eq!(refl.registers()[0].input_type(), ShaderInputType::CBuffer);
    assert_eq!(refl.node_name(2), Some("globals"));
    // Element byte size of the record.
    assert_eq!(refl.registers()[0].num_samples(), 16);
}

#[test]
fn array_descriptors_deduplicate_across_declarations() {
    let mut tex_a = texture_array();
    if let AstDecl::Resource(resource) = &mut tex_a {
        resource.name = "tex_a".into();
    }
    let mut tex_b = texture_array();
    if let AstDecl::Resource(resource) = &mut tex_b {
        resource.name = "tex_b".into();
        resource.assignment = RegisterAssignment::with_space(9, 2);
    }

    let refl = reflect(&[tex_a, tex_b], &options());
    validate(&refl).unwrap();

    assert_eq!(refl.registers().len(), 2);
    assert_eq!(refl.arrays().len(), 1);
    assert_eq!(
        refl.registers()[0].array_id(),
        refl.registers()[1].array_id()
    );
}

#[test]
fn round_trip_preserves_lookup_resolution() {
    let refl = reflect(&[globals_cbuffer(), texture_array(), mode_enum()], &options());
    let loaded = Reflection::from_bytes(&refl.dump(), true).unwrap();
    let lookup = loaded.name_lookup().unwrap();
    assert!(lookup.fully_resolved_to_node_id.contains_key("Globals"));
    assert!(lookup.fully_resolved_to_node_id.contains_key("Mode::A"));
    assert!(lookup.fully_resolved_to_member_id.contains_key("Globals.g_color"));
}

#[test]
fn render_shows_register_lines() {
    let refl = reflect(&[globals_cbuffer(), texture_array()], &options());
    let out = refl.render();
    assert!(out.contains("Register Globals"), "{out}");
    assert!(out.contains(" : register(b0, space0);"), "{out}");
    assert!(out.contains("[2][3] : register(t5, space2);"), "{out}");
    assert!(out.contains("Variable g_color"), "{out}");
}
