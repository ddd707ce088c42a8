use super::*;

fn symbols() -> Features {
    Features::BASICS | Features::USER_TYPES | Features::NAMESPACES | Features::SYMBOL_INFO
}

#[test]
fn new_instance_has_root_namespace() {
    let refl = Reflection::new(symbols());
    assert_eq!(refl.nodes().len(), 1);
    let root = &refl.nodes()[0];
    assert_eq!(root.node_type(), NodeType::Namespace);
    assert_eq!(root.parent_id(), ROOT_PARENT);
    assert_eq!(root.child_count(), 0);
    // The empty string is pre-interned for anonymous nodes.
    assert_eq!(refl.strings().len(), 1);
    assert_eq!(refl.strings().get(0), "");
    assert_eq!(refl.node_symbols()[0].file_name_id(), NO_FILE);
}

#[test]
fn new_without_symbols_has_no_debug_tables() {
    let refl = Reflection::new(Features::BASICS);
    assert!(refl.strings().is_empty());
    assert!(refl.node_symbols().is_empty());
    assert!(refl.sources().is_empty());
}

#[test]
fn push_node_propagates_child_counts() {
    let mut refl = Reflection::new(symbols());
    let a = refl.push_node("A", NodeType::Namespace, 0, 0, &[], None);
    let b = refl.push_node("B", NodeType::Namespace, a, 0, &[], None);
    let c = refl.push_node("C", NodeType::Namespace, b, 0, &[], None);
    refl.push_node("D", NodeType::Namespace, a, 0, &[], None);

    // Transitive counts: root sees all four, A sees three, B sees one.
    assert_eq!(refl.nodes()[0].child_count(), 4);
    assert_eq!(refl.nodes()[a as usize].child_count(), 3);
    assert_eq!(refl.nodes()[b as usize].child_count(), 1);
    assert_eq!(refl.nodes()[c as usize].child_count(), 0);
}

#[test]
fn push_node_records_annotations() {
    let mut refl = Reflection::new(symbols());
    let annotations = [
        NodeAnnotation::user("keep"),
        NodeAnnotation::shader_stage("compute"),
    ];
    let id = refl.push_node("main", NodeType::Namespace, 0, 0, &annotations, None);

    let node = &refl.nodes()[id as usize];
    assert_eq!(node.annotation_start(), 0);
    assert_eq!(node.annotation_count(), 2);
    assert_eq!(refl.annotations().len(), 2);
    assert!(!refl.annotations()[0].is_builtin());
    assert!(refl.annotations()[1].is_builtin());
    let text = refl
        .strings_non_debug()
        .get(refl.annotations()[1].string_non_debug());
    assert_eq!(text, "shader(\"compute\")");
}

#[test]
fn push_node_interns_source_file() {
    let mut refl = Reflection::new(symbols());
    let span = SourceSpan {
        file: "shader.hlsl".into(),
        line_start: 3,
        line_end: 5,
        column_start: 1,
        column_end: 2,
    };
    let a = refl.push_node("a", NodeType::Namespace, 0, 0, &[], Some(&span));
    let b = refl.push_node("b", NodeType::Namespace, 0, 0, &[], Some(&span));

    assert_eq!(refl.sources().len(), 1);
    let sym_a = &refl.node_symbols()[a as usize];
    let sym_b = &refl.node_symbols()[b as usize];
    assert_eq!(sym_a.file_name_id(), 0);
    assert_eq!(sym_b.file_name_id(), 0);
    assert_eq!(sym_a.source_line_start(), 3);
    assert_eq!(sym_a.source_line_count(), 3);
    assert_eq!(refl.strings().get(refl.sources().string_id(0)), "shader.hlsl");
}

#[test]
fn direct_children_skips_subtrees() {
    let mut refl = Reflection::new(symbols());
    let a = refl.push_node("A", NodeType::Namespace, 0, 0, &[], None);
    refl.push_node("A1", NodeType::Namespace, a, 0, &[], None);
    let b = refl.push_node("B", NodeType::Namespace, 0, 0, &[], None);

    let children: Vec<u32> = refl.direct_children(0).collect();
    assert_eq!(children, vec![a, b]);
}

#[test]
fn intern_is_idempotent_per_pool() {
    let mut refl = Reflection::new(symbols());
    let a = refl.intern_string("tex", Pool::Debug);
    let b = refl.intern_string("tex", Pool::Debug);
    let c = refl.intern_string("tex", Pool::NonDebug);
    assert_eq!(a, b);
    // Pools are independent; the non-debug pool starts empty.
    assert_eq!(c, 0);
}

#[test]
fn push_array_returns_none_for_flat_or_single() {
    let mut refl = Reflection::new(symbols());
    assert_eq!(refl.push_array(1, &[1]), NONE);
    assert_eq!(refl.push_array(6, &[6]), NONE);
    assert_eq!(refl.push_array(0, &[2, 3]), NONE);
}

#[test]
fn push_array_dedups_identical_shapes() {
    let mut refl = Reflection::new(symbols());
    let first = refl.push_array(6, &[2, 3]);
    let second = refl.push_array(6, &[2, 3]);
    let third = refl.push_array(8, &[2, 4]);

    assert_eq!(first, 0);
    assert_eq!(second, first);
    assert_eq!(third, 1);
    assert_eq!(refl.arrays().len(), 2);
    // No orphan size runs from the deduplicated registration.
    assert_eq!(refl.array_sizes(), &[2, 3, 2, 4]);
}

#[test]
fn push_array_folds_trailing_dimensions() {
    let mut refl = Reflection::new(symbols());
    let sizes = [2, 2, 2, 2, 2, 2, 2, 3, 5];
    let flat: u32 = sizes.iter().product();
    let id = refl.push_array(flat, &sizes);

    let array = &refl.arrays()[id as usize];
    assert_eq!(array.rank(), 8);
    let start = array.size_start() as usize;
    assert_eq!(&refl.array_sizes()[start..start + 8], &[2, 2, 2, 2, 2, 2, 2, 15]);
}

#[test]
fn push_type_dedups_structurally() {
    let mut refl = Reflection::new(symbols());
    let float4 = TypeDesc::new(NONE, 0, VariableClass::Vector, VariableType::Float, 1, 4, 0, 0);
    let name = refl.intern_string("float4", Pool::Debug);
    let other_name = refl.intern_string("alias", Pool::Debug);

    let first = refl.push_type(float4, name);
    let second = refl.push_type(float4, other_name);
    assert_eq!(first, second);
    assert_eq!(refl.types().len(), 1);
    // The first registration's name wins.
    assert_eq!(refl.type_name_ids(), &[name]);
}

#[test]
fn strip_symbols_clears_debug_side() {
    let mut refl = Reflection::new(symbols());
    let span = SourceSpan {
        file: "a.hlsl".into(),
        line_start: 1,
        line_end: 1,
        column_start: 1,
        column_end: 10,
    };
    refl.push_node("N", NodeType::Namespace, 0, 0, &[NodeAnnotation::user("x")], Some(&span));
    refl.generate_name_lookup_table();

    let before = refl.clone();
    refl.strip_symbols();

    assert!(refl.strings().is_empty());
    assert!(refl.sources().is_empty());
    assert!(refl.node_symbols().is_empty());
    assert!(refl.member_name_ids().is_empty());
    assert!(refl.type_name_ids().is_empty());
    assert!(refl.name_lookup().is_none());
    assert!(!refl.has_symbol_info());
    // Non-debug content survives.
    assert_eq!(refl.strings_non_debug().len(), 1);
    assert!(refl.is_same_non_debug(&before));
    assert!(before.is_same_non_debug(&refl));

    // Stripping is idempotent.
    let stripped_once = refl.clone();
    refl.strip_symbols();
    assert_eq!(refl, stripped_once);
}

#[test]
fn equality_ignores_lookup_tables() {
    let mut a = Reflection::new(symbols());
    a.push_node("N", NodeType::Namespace, 0, 0, &[], None);
    let mut b = a.clone();
    b.generate_name_lookup_table();
    assert_eq!(a, b);
}
