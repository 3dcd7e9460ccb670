//! Compilers for procedural pattern nodes.
//!
//! Every pattern emits a call into the fixed helper library that the
//! assembler declares once in the shader prelude. Coordinates are converted to
//! vec2, parameters to scalars, per the slot declarations.

use crate::error::CompileError;
use crate::registry;

use super::types::TypedExpr;
use super::{CompilationState, NodeRecord, input_expr};

pub(crate) fn compile(
    state: &mut CompilationState,
    node: &NodeRecord,
) -> Result<TypedExpr, CompileError> {
    let coord = input_expr(state, node, 0)?;
    let p0 = input_expr(state, node, 1)?;

    let source = match node.type_name.as_str() {
        registry::PATTERN_NOISE => {
            format!("fx_value_noise(({}) * ({}))", coord.source, p0.source)
        }
        registry::PATTERN_FBM => {
            let gain = input_expr(state, node, 2)?;
            format!(
                "fx_fbm(({}) * ({}), {})",
                coord.source, p0.source, gain.source
            )
        }
        registry::PATTERN_VORONOI => {
            format!("fx_voronoi(({}) * ({}))", coord.source, p0.source)
        }
        registry::PATTERN_STRIPES => {
            let phase = input_expr(state, node, 2)?;
            format!("fx_stripes({}, {}, {})", coord.source, p0.source, phase.source)
        }
        registry::PATTERN_CHECKER => {
            format!("fx_checker({}, {})", coord.source, p0.source)
        }
        // pattern/rings
        _ => format!("fx_rings({}, {})", coord.source, p0.source),
    };
    Ok(TypedExpr::scalar(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::normalize;
    use crate::compiler::types::ExprType;
    use crate::dsl::{GraphDocument, NodeDescriptor, link_entry};

    fn compile_pattern(type_name: &str) -> TypedExpr {
        let doc = GraphDocument {
            nodes: vec![
                NodeDescriptor::new(1, registry::INPUT_COORD),
                NodeDescriptor::new(2, type_name),
            ],
            links: vec![link_entry(1, 1, 0, 2, 0)],
        };
        let mut state = normalize(&doc).unwrap();
        let node = state.nodes.get(&2).unwrap().clone();
        compile(&mut state, &node).unwrap()
    }

    #[test]
    fn noise_scales_the_surface_coordinate() {
        let expr = compile_pattern(registry::PATTERN_NOISE);
        assert_eq!(expr.ty, ExprType::Scalar);
        assert_eq!(expr.source, "fx_value_noise((sp) * (4.0))");
    }

    #[test]
    fn fbm_forwards_its_gain() {
        let expr = compile_pattern(registry::PATTERN_FBM);
        assert_eq!(expr.source, "fx_fbm((sp) * (3.0), 0.5)");
    }

    #[test]
    fn stripes_carry_frequency_and_phase() {
        let expr = compile_pattern(registry::PATTERN_STRIPES);
        assert_eq!(expr.source, "fx_stripes(sp, 6.0, 0.0)");
    }
}
