//! Module-walk driver: feeds a tree of facade declarations through the
//! builder operations in declaration order.

use hlslr_reflection::records::{EnumDesc, EnumValue, Function};
use hlslr_reflection::reflection::Reflection;
use hlslr_reflection::taxonomy::NodeType;
use hlslr_reflection::Features;

use crate::ast::AstDecl;
use crate::registers::{fill_register, register_buffer};

/// What and how to reflect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReflectOptions {
    pub features: Features,
    /// Register space for assignments that spell none.
    pub auto_bind_space: u32,
    /// Matrix orientation for types without an explicit qualifier.
    /// HLSL defaults to column-major.
    pub default_row_major: bool,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        Self {
            features: Features::all(),
            auto_bind_space: 0,
            default_row_major: false,
        }
    }
}

/// Build a reflection instance from a module's declarations.
pub fn reflect(decls: &[AstDecl], options: &ReflectOptions) -> Reflection {
    let mut refl = Reflection::new(options.features);
    walk_decls(&mut refl, decls, 0, false, options);
    refl
}

fn walk_decls(
    refl: &mut Reflection,
    decls: &[AstDecl],
    parent_node: u32,
    in_function: bool,
    options: &ReflectOptions,
) {
    let features = options.features;

    for decl in decls {
        match decl {
            AstDecl::Namespace { name, decls, span } => {
                if !features.contains(Features::NAMESPACES) {
                    continue;
                }
                let node_id =
                    refl.push_node(name, NodeType::Namespace, parent_node, 0, &[], span.as_ref());
                walk_decls(refl, decls, node_id, in_function, options);
            }

            AstDecl::Buffer(block) => {
                if !features.contains(Features::BASICS) || in_function {
                    continue;
                }
                register_buffer(
                    refl,
                    block,
                    parent_node,
                    options.auto_bind_space,
                    options.default_row_major,
                );
            }

            AstDecl::Resource(resource) => {
                if !features.contains(Features::BASICS) || in_function {
                    continue;
                }
                fill_register(
                    refl,
                    resource,
                    parent_node,
                    options.auto_bind_space,
                    options.default_row_major,
                );
            }

            AstDecl::Function(function) => {
                if !features.contains(Features::FUNCTIONS) {
                    continue;
                }
                let node_id = refl.push_node(
                    &function.name,
                    NodeType::Function,
                    parent_node,
                    refl.functions().len() as u32,
                    &function.annotations,
                    function.span.as_ref(),
                );
                refl.push_function(Function::new(
                    node_id,
                    function.num_parameters,
                    function.has_return,
                    function.body.is_some(),
                ));

                if let Some(body) = &function.body {
                    if features.contains(Features::SCOPES) {
                        walk_decls(refl, body, node_id, true, options);
                    }
                }
            }

            AstDecl::Enum(decl) => {
                if !features.contains(Features::USER_TYPES) {
                    continue;
                }
                let node_id = refl.push_node(
                    &decl.name,
                    NodeType::Enum,
                    parent_node,
                    refl.enums().len() as u32,
                    &decl.annotations,
                    decl.span.as_ref(),
                );
                for (name, value) in &decl.values {
                    let value_id = refl.enum_values().len() as u32;
                    let value_node = refl.push_node(
                        name,
                        NodeType::EnumValue,
                        node_id,
                        value_id,
                        &[],
                        decl.span.as_ref(),
                    );
                    refl.push_enum_value(EnumValue::new(*value, value_node));
                }
                refl.push_enum(EnumDesc::new(node_id, decl.element_type.enum_element_type()));
            }

            AstDecl::Typedef { name, span } => {
                if !features.contains(Features::USER_TYPES) {
                    continue;
                }
                refl.push_node(name, NodeType::Typedef, parent_node, 0, &[], span.as_ref());
            }

            AstDecl::Using { name, span } => {
                if !features.contains(Features::USER_TYPES) {
                    continue;
                }
                refl.push_node(name, NodeType::Using, parent_node, 0, &[], span.as_ref());
            }
        }
    }
}
