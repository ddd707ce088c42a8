//! Human-readable dump of a reflection instance.
//!
//! Debug aid only; the shape mirrors the node tree with one line per node,
//! annotation lines in attribute brackets, and recursive type expansions
//! under variables.

use std::fmt::Write as _;

use crate::records::{Register, TypeDesc};
use crate::reflection::Reflection;
use crate::taxonomy::{NodeType, VariableClass};

impl Reflection {
    /// Render the tree as text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(self, &mut out, 0, 0, 0);
        out
    }

    /// Print [`Self::render`] to stdout.
    pub fn printf(&self) {
        print!("{}", self.render());
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Print one node and its subtree; returns the node's transitive child
/// count so the caller can skip past the subtree.
fn render_node(
    refl: &Reflection,
    out: &mut String,
    node_id: u32,
    depth: usize,
    index_in_parent: u32,
) -> u32 {
    let node = &refl.nodes()[node_id as usize];
    let mut variable_type = None;

    if node_id != 0 {
        indent(out, depth - 1);
        let name = refl.node_name(node_id).unwrap_or("(unknown)");
        let _ = writeln!(out, "{} {}", node.node_type().name(), name);

        for i in 0..node.annotation_count() {
            let annotation = &refl.annotations()[(node.annotation_start() + i) as usize];
            let text = refl.strings_non_debug().get(annotation.string_non_debug());
            indent(out, depth);
            let _ = if annotation.is_builtin() {
                writeln!(out, "[{text}]")
            } else {
                writeln!(out, "[[{text}]]")
            };
        }

        let local_id = node.local_id();
        match node.node_type() {
            NodeType::Register => {
                let reg = &refl.registers()[local_id as usize];
                indent(out, depth);
                let _ = writeln!(
                    out,
                    "{} : register({}{}, space{});",
                    register_array_suffix(refl, reg),
                    reg.input_type().space_char(),
                    reg.bind_point(),
                    reg.space()
                );
            }
            NodeType::Variable => variable_type = Some(local_id),
            NodeType::Function => {
                let function = &refl.functions()[local_id as usize];
                indent(out, depth);
                let _ = writeln!(
                    out,
                    "return: {}, hasDefinition: {}, numParams: {}",
                    function.has_return(),
                    function.has_definition(),
                    function.num_parameters()
                );
            }
            NodeType::Enum => {
                indent(out, depth);
                let _ = writeln!(
                    out,
                    ": {}",
                    refl.enums()[local_id as usize].element_type().name()
                );
            }
            NodeType::EnumValue => {
                indent(out, depth);
                let _ = writeln!(
                    out,
                    "#{index_in_parent} = {}",
                    refl.enum_values()[local_id as usize].value()
                );
            }
            NodeType::Namespace | NodeType::Typedef | NodeType::Using => {}
        }
    }

    if let Some(type_id) = variable_type {
        render_type(refl, out, type_id, depth, "");
    }

    let mut offset = 0;
    let mut child_index = 0;
    while offset < node.child_count() {
        offset += 1 + render_node(refl, out, node_id + 1 + offset, depth + 1, child_index);
        child_index += 1;
    }

    node.child_count()
}

fn render_type(refl: &Reflection, out: &mut String, type_id: u32, depth: usize, prefix: &str) {
    let ty = &refl.types()[type_id as usize];

    let name = if refl.has_symbol_info() {
        refl.strings()
            .get(refl.type_name_ids()[type_id as usize])
            .to_string()
    } else {
        builtin_type_name(ty)
    };
    let name = if name.is_empty() && !refl.has_symbol_info() {
        "(unknown)".to_string()
    } else {
        name
    };

    indent(out, depth);
    let _ = writeln!(out, "{prefix}{name}{}", type_info(refl, ty, &name));

    if let Some(base) = ty.base_class() {
        render_type(refl, out, base, depth + 1, prefix);
    }

    for i in 0..ty.member_count() {
        let member_id = (ty.member_start() + i) as usize;
        let member_prefix = if refl.has_symbol_info() {
            format!("{}: ", refl.strings().get(refl.member_name_ids()[member_id]))
        } else {
            "(unknown): ".to_string()
        };
        render_type(
            refl,
            out,
            refl.member_type_ids()[member_id],
            depth + 1,
            &member_prefix,
        );
    }
}

/// Array suffix plus the builtin spelling when it adds information over
/// the displayed name.
fn type_info(refl: &Reflection, ty: &TypeDesc, displayed_name: &str) -> String {
    let mut result = String::new();

    if let Some(array_id) = ty.array_id() {
        let array = &refl.arrays()[array_id as usize];
        for i in 0..array.rank() {
            let _ = write!(
                result,
                "[{}]",
                refl.array_sizes()[(array.size_start() + i) as usize]
            );
        }
    } else if ty.is_array() {
        let _ = write!(result, "[{}]", ty.element_count());
    }

    let underlying = builtin_type_name(ty);
    if displayed_name != underlying && !underlying.is_empty() {
        let _ = write!(result, " ({underlying})");
    }

    result
}

/// HLSL spelling of a builtin type (`float4`, `float4x4`, `Texture2D`…);
/// empty for user-defined types.
fn builtin_type_name(ty: &TypeDesc) -> String {
    let mut name = String::new();

    let class = VariableClass::from_u8(ty.class_raw());
    if class != Some(VariableClass::Struct) {
        if let Some(spelling) = ty.var_type().and_then(|t| t.name()) {
            name.push_str(spelling);
        }
    }

    match class {
        Some(VariableClass::Vector) => {
            let _ = write!(name, "{}", ty.columns());
        }
        Some(VariableClass::MatrixRows) => {
            let _ = write!(name, "{}x{}", ty.columns(), ty.rows());
        }
        Some(VariableClass::MatrixColumns) => {
            let _ = write!(name, "{}x{}", ty.rows(), ty.columns());
        }
        _ => {}
    }

    name
}

fn register_array_suffix(refl: &Reflection, reg: &Register) -> String {
    if let Some(array_id) = reg.array_id() {
        let array = &refl.arrays()[array_id as usize];
        let mut suffix = String::new();
        for i in 0..array.rank() {
            let _ = write!(
                suffix,
                "[{}]",
                refl.array_sizes()[(array.size_start() + i) as usize]
            );
        }
        return suffix;
    }
    if reg.bind_count() > 1 {
        format!("[{}]", reg.bind_count())
    } else {
        String::new()
    }
}
