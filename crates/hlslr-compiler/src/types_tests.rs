use hlslr_reflection::reflection::Reflection;
use hlslr_reflection::taxonomy::{VariableClass, VariableType};
use hlslr_reflection::Features;

use super::ast::{AstField, AstType, Scalar};
use super::types::register_type;

fn instance() -> Reflection {
    Reflection::new(Features::BASICS | Features::USER_TYPES | Features::SYMBOL_INFO)
}

#[test]
fn scalar_mapping_and_shape() {
    let mut refl = instance();
    let id = register_type(&mut refl, &AstType::builtin(Scalar::Half), false);
    let ty = &refl.types()[id as usize];
    assert_eq!(ty.class(), VariableClass::Scalar);
    assert_eq!(ty.var_type(), Some(VariableType::Float16));
    assert_eq!((ty.rows(), ty.columns()), (1, 1));
    assert!(!ty.is_array());
}

#[test]
fn identical_types_deduplicate() {
    let mut refl = instance();
    let first = register_type(&mut refl, &AstType::vector(Scalar::Float, 4), false);
    let second = register_type(&mut refl, &AstType::vector(Scalar::Float, 4), false);
    assert_eq!(first, second);
    assert_eq!(refl.types().len(), 1);
}

#[test]
fn vector_shape() {
    let mut refl = instance();
    let id = register_type(&mut refl, &AstType::vector(Scalar::Int, 3), false);
    let ty = &refl.types()[id as usize];
    assert_eq!(ty.class(), VariableClass::Vector);
    assert_eq!(ty.var_type(), Some(VariableType::Int));
    assert_eq!((ty.rows(), ty.columns()), (1, 3));
    assert_eq!(refl.strings().get(refl.type_name_ids()[id as usize]), "int3");
}

#[test]
fn matrix_defaults_to_column_major() {
    let mut refl = instance();
    let id = register_type(&mut refl, &AstType::matrix(Scalar::Float, 4, 3), false);
    let ty = &refl.types()[id as usize];
    assert_eq!(ty.class(), VariableClass::MatrixColumns);
    // Column-major swaps the spelled columns and rows.
    assert_eq!((ty.rows(), ty.columns()), (4, 3));
}

#[test]
fn matrix_row_major_qualifier_wins() {
    let mut refl = instance();
    let id = register_type(
        &mut refl,
        &AstType::matrix(Scalar::Float, 4, 3).row_major(),
        false,
    );
    let ty = &refl.types()[id as usize];
    assert_eq!(ty.class(), VariableClass::MatrixRows);
    assert_eq!((ty.rows(), ty.columns()), (3, 4));
}

#[test]
fn matrix_default_policy_applies_without_qualifier() {
    let mut refl = instance();
    let id = register_type(&mut refl, &AstType::matrix(Scalar::Float, 2, 2), true);
    assert_eq!(refl.types()[id as usize].class(), VariableClass::MatrixRows);

    let explicit = register_type(
        &mut refl,
        &AstType::matrix(Scalar::Float, 2, 2).column_major(),
        true,
    );
    assert_eq!(
        refl.types()[explicit as usize].class(),
        VariableClass::MatrixColumns
    );
}

#[test]
fn one_dimensional_arrays_inline_their_count() {
    let mut refl = instance();
    let id = register_type(
        &mut refl,
        &AstType::array(AstType::builtin(Scalar::Float), 5),
        false,
    );
    let ty = &refl.types()[id as usize];
    assert!(ty.is_array());
    assert!(!ty.is_multi_dimensional_array());
    assert_eq!(ty.element_count(), 5);
    assert!(refl.arrays().is_empty());
}

#[test]
fn multi_dimensional_arrays_use_a_descriptor() {
    let mut refl = instance();
    let nested = AstType::array(AstType::array(AstType::vector(Scalar::Float, 4), 3), 2);
    let id = register_type(&mut refl, &nested, false);
    let ty = &refl.types()[id as usize];
    assert!(ty.is_multi_dimensional_array());
    let array = &refl.arrays()[ty.array_id().unwrap() as usize];
    assert_eq!(array.rank(), 2);
    let start = array.size_start() as usize;
    assert_eq!(&refl.array_sizes()[start..start + 2], &[2, 3]);
    // The element name, not the array spelling, is the type name.
    assert_eq!(
        refl.strings().get(refl.type_name_ids()[id as usize]),
        "float4"
    );
}

#[test]
fn record_members_are_contiguous() {
    let mut refl = instance();
    let inner = AstType::record(
        "Inner",
        vec![],
        vec![
            AstField::new("x", AstType::builtin(Scalar::Float)),
            AstField::new("y", AstType::builtin(Scalar::Float)),
        ],
    );
    let outer = AstType::record(
        "Outer",
        vec![],
        vec![
            AstField::new("a", AstType::builtin(Scalar::Float)),
            AstField::new("b", inner),
        ],
    );
    let outer_id = register_type(&mut refl, &outer, false);

    let float_id = 0;
    let inner_id = 1;
    assert_eq!(outer_id, 2);
    // Inner's members land first, then Outer's two in one contiguous run
    // even though Inner was registered between Outer's fields.
    assert_eq!(refl.member_type_ids(), &[float_id, float_id, float_id, inner_id]);

    let outer_ty = &refl.types()[outer_id as usize];
    assert_eq!(outer_ty.member_start(), 2);
    assert_eq!(outer_ty.member_count(), 2);
    let inner_ty = &refl.types()[inner_id as usize];
    assert_eq!(inner_ty.member_start(), 0);
    assert_eq!(inner_ty.member_count(), 2);

    let member_names: Vec<&str> = refl
        .member_name_ids()
        .iter()
        .map(|&id| refl.strings().get(id))
        .collect();
    assert_eq!(member_names, vec!["x", "y", "a", "b"]);
}

#[test]
fn record_base_is_registered_first() {
    let mut refl = instance();
    let base = AstType::record(
        "Base",
        vec![],
        vec![AstField::new("n", AstType::builtin(Scalar::UInt))],
    );
    let derived = AstType::record(
        "Derived",
        vec![base],
        vec![AstField::new("m", AstType::builtin(Scalar::Float))],
    );
    let id = register_type(&mut refl, &derived, false);
    let ty = &refl.types()[id as usize];
    let base_id = ty.base_class().unwrap();
    assert!(base_id < id);
    assert_eq!(refl.types()[base_id as usize].class(), VariableClass::Struct);
}

#[test]
fn resource_templates_become_objects() {
    let mut refl = instance();
    let id = register_type(
        &mut refl,
        &AstType::resource("Texture2D", AstType::vector(Scalar::Float, 4)),
        false,
    );
    let ty = &refl.types()[id as usize];
    assert_eq!(ty.class(), VariableClass::Object);
    assert_eq!(ty.var_type(), Some(VariableType::Texture2D));
    assert_eq!((ty.rows(), ty.columns()), (0, 0));

    let sampler = register_type(&mut refl, &AstType::object("SamplerState"), false);
    assert_eq!(
        refl.types()[sampler as usize].var_type(),
        Some(VariableType::Sampler)
    );
}

#[test]
fn no_type_names_without_symbol_info() {
    let mut refl = Reflection::new(Features::BASICS);
    register_type(&mut refl, &AstType::builtin(Scalar::Float), false);
    assert_eq!(refl.types().len(), 1);
    assert!(refl.type_name_ids().is_empty());
    assert!(refl.strings().is_empty());
}

#[test]
#[should_panic(expected = "multiple base types")]
fn multiple_bases_panic() {
    let mut refl = instance();
    let a = AstType::record(
        "A",
        vec![],
        vec![AstField::new("x", AstType::builtin(Scalar::Float))],
    );
    let b = AstType::record(
        "B",
        vec![],
        vec![AstField::new("y", AstType::builtin(Scalar::Float))],
    );
    let bad = AstType::record(
        "C",
        vec![a, b],
        vec![AstField::new("z", AstType::builtin(Scalar::Float))],
    );
    register_type(&mut refl, &bad, false);
}
