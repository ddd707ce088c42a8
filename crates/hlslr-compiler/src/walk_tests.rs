use hlslr_reflection::reflection::NodeAnnotation;
use hlslr_reflection::taxonomy::NodeType;
use hlslr_reflection::{validate, Features};

use super::ast::{
    AstDecl, AstField, AstType, BlockKind, BufferBlock, EnumDecl, FunctionDecl,
    RegisterAssignment, ResourceDecl, Scalar,
};
use super::walk::{reflect, ReflectOptions};

fn options(features: Features) -> ReflectOptions {
    ReflectOptions {
        features,
        ..ReflectOptions::default()
    }
}

fn sample_enum() -> AstDecl {
    AstDecl::Enum(EnumDecl {
        name: "Mode".into(),
        element_type: Scalar::UInt16,
        values: vec![("A".into(), 1), ("B".into(), 2)],
        annotations: vec![],
        span: None,
    })
}

fn sample_function(body: Option<Vec<AstDecl>>) -> AstDecl {
    AstDecl::Function(FunctionDecl {
        name: "main".into(),
        num_parameters: 2,
        has_return: true,
        body,
        annotations: vec![NodeAnnotation::shader_stage("compute")],
        span: None,
    })
}

fn sample_texture() -> AstDecl {
    AstDecl::Resource(ResourceDecl {
        name: "tex".into(),
        ty: AstType::resource("Texture2D", AstType::vector(Scalar::Float, 4)),
        array: vec![],
        assignment: RegisterAssignment::new(0),
        annotations: vec![],
        span: None,
    })
}

#[test]
fn walked_modules_validate() {
    let decls = [
        sample_texture(),
        sample_enum(),
        sample_function(Some(vec![sample_enum()])),
        AstDecl::Namespace {
            name: "ns".into(),
            decls: vec![AstDecl::Buffer(BufferBlock {
                name: "Globals".into(),
                kind: BlockKind::CBuffer,
                fields: vec![AstField::new("v", AstType::vector(Scalar::Float, 4))],
                assignment: RegisterAssignment::new(0),
                annotations: vec![],
                span: None,
            })],
            span: None,
        },
        AstDecl::Typedef {
            name: "MyFloat".into(),
            span: None,
        },
        AstDecl::Using {
            name: "Other".into(),
            span: None,
        },
    ];
    let refl = reflect(&decls, &options(Features::all()));
    validate(&refl).expect("walked module must validate");

    assert_eq!(refl.registers().len(), 2);
    assert_eq!(refl.functions().len(), 1);
    assert_eq!(refl.enums().len(), 2);
    assert_eq!(refl.buffers().len(), 1);
}

#[test]
fn features_gate_declaration_kinds() {
    let decls = [
        sample_texture(),
        sample_enum(),
        sample_function(None),
        AstDecl::Typedef {
            name: "T".into(),
            span: None,
        },
    ];

    let basics = reflect(&decls, &options(Features::BASICS));
    assert_eq!(basics.registers().len(), 1);
    assert!(basics.enums().is_empty());
    assert!(basics.functions().is_empty());
    assert_eq!(basics.nodes().len(), 2);

    let user_types = reflect(&decls, &options(Features::USER_TYPES));
    assert!(user_types.registers().is_empty());
    assert_eq!(user_types.enums().len(), 1);
    // Enum + 2 values + typedef, under the root.
    assert_eq!(user_types.nodes().len(), 5);
}

#[test]
fn namespaces_gate_their_contents() {
    let decls = [AstDecl::Namespace {
        name: "ns".into(),
        decls: vec![sample_texture()],
        span: None,
    }];

    let without = reflect(&decls, &options(Features::BASICS));
    assert_eq!(without.nodes().len(), 1);
    assert!(without.registers().is_empty());

    let with = reflect(&decls, &options(Features::BASICS | Features::NAMESPACES));
    assert_eq!(with.registers().len(), 1);
    let register_node = &with.nodes()[with.registers()[0].node_id() as usize];
    assert_eq!(register_node.parent_id(), 1);
}

#[test]
fn function_bodies_recurse_only_with_scopes() {
    let decls = [sample_function(Some(vec![sample_enum()]))];

    let features = Features::FUNCTIONS | Features::USER_TYPES;
    let without_scopes = reflect(&decls, &options(features));
    assert!(without_scopes.enums().is_empty());
    assert_eq!(without_scopes.nodes()[1].child_count(), 0);

    let with_scopes = reflect(&decls, &options(features | Features::SCOPES));
    assert_eq!(with_scopes.enums().len(), 1);
    // Enum and its two values nest under the function node.
    assert_eq!(with_scopes.nodes()[1].child_count(), 3);
    assert_eq!(with_scopes.nodes()[1].node_type(), NodeType::Function);
}

#[test]
fn resources_inside_function_scopes_are_not_bindings() {
    let decls = [sample_function(Some(vec![sample_texture()]))];
    let refl = reflect(&decls, &options(Features::all()));
    assert!(refl.registers().is_empty());
}

#[test]
fn function_records_shape_and_annotations() {
    let decls = [sample_function(None)];
    let refl = reflect(
        &decls,
        &options(Features::FUNCTIONS | Features::SYMBOL_INFO),
    );

    let function = &refl.functions()[0];
    assert_eq!(function.num_parameters(), 2);
    assert!(function.has_return());
    assert!(!function.has_definition());

    let node = &refl.nodes()[function.node_id() as usize];
    assert_eq!(node.annotation_count(), 1);
    let annotation = &refl.annotations()[node.annotation_start() as usize];
    assert!(annotation.is_builtin());
    assert_eq!(
        refl.strings_non_debug().get(annotation.string_non_debug()),
        "shader(\"compute\")"
    );
}

#[test]
fn auto_bind_space_fills_unspecified_spaces() {
    let decls = [
        AstDecl::Resource(ResourceDecl {
            name: "a".into(),
            ty: AstType::object("SamplerState"),
            array: vec![],
            assignment: RegisterAssignment::new(0),
            annotations: vec![],
            span: None,
        }),
        AstDecl::Resource(ResourceDecl {
            name: "b".into(),
            ty: AstType::object("SamplerState"),
            array: vec![],
            assignment: RegisterAssignment::with_space(1, 7),
            annotations: vec![],
            span: None,
        }),
    ];
    let refl = reflect(
        &decls,
        &ReflectOptions {
            features: Features::BASICS,
            auto_bind_space: 3,
            default_row_major: false,
        },
    );
    assert_eq!(refl.registers()[0].space(), 3);
    assert_eq!(refl.registers()[1].space(), 7);
}
