//! Parameter-level constructors that lay out blueprint subtrees.
//!
//! Every builder validates its geometry before touching the tree, so a failed
//! call leaves the tree unchanged. The new subtree goes under `parent` when one
//! is given and becomes a root otherwise.

use blueprint_types::{IntervalBox, Point3, Side};
use scene_backend::{ConeParams, CylinderParams};
use serde::{Deserialize, Serialize};
use shape_ops::frame::FRAME_QUAD_NAMES;
use shape_ops::{BoxDecomposer, Frame3dGeometry, FrameGeometry, Palisade, RegularPrism};
use tracing::{info, instrument};

use crate::config::BuildConfig;
use crate::tree::{BlueprintTree, Node, Shape};
use crate::types::{EngineError, NodeId};

/// A hollow box made of six wall cuboids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    pub outer: IntervalBox,
    /// Falls back to [`BuildConfig::wall_thickness`].
    #[serde(default)]
    pub thickness: Option<f64>,
    /// Wall pair that spans the full outer footprint.
    pub big: Side,
    /// Wall pair that is inset on both transverse axes.
    pub small: Side,
}

/// Container named `name` holding the six walls `botpart` .. `frontpart`.
#[instrument(skip(tree, params, config))]
pub fn box_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    params: &BoxParams,
    config: &BuildConfig,
) -> Result<NodeId, EngineError> {
    let mut outer = params.outer;
    outer.requantize(config.quantum);
    let thickness = params.thickness.unwrap_or(config.wall_thickness);
    let walls = BoxDecomposer::new(params.big, params.small)?.decompose(&outer, thickness)?;

    let container = tree.insert(parent, Node::container(name))?;
    for (wall_name, bounds) in walls.named() {
        tree.add_child(container, Node::new(wall_name, Shape::Cuboid(bounds)))?;
    }
    info!(box_name = name, %outer, thickness, "box blueprint laid out");
    Ok(container)
}

/// Container holding one polygon per palisade quad, named `quad.0`, `quad.1`, ...
pub fn palisade_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    palisade: &Palisade,
) -> Result<NodeId, EngineError> {
    let container = tree.insert(parent, Node::container(name))?;
    for (i, quad) in palisade.quads().iter().enumerate() {
        tree.add_child(
            container,
            Node::new(format!("quad.{i}"), Shape::Polygon(quad.to_mesh())),
        )?;
    }
    Ok(container)
}

/// Container holding the four band quads of a flat frame.
pub fn frame_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    frame: &FrameGeometry,
) -> Result<NodeId, EngineError> {
    let container = tree.insert(parent, Node::container(name))?;
    for (quad_name, quad) in FRAME_QUAD_NAMES.iter().zip(frame.quads()) {
        tree.add_child(container, Node::new(*quad_name, Shape::Polygon(quad.to_mesh())))?;
    }
    Ok(container)
}

/// Window frame: front and back frames, the two palisades joining them and,
/// optionally, a pane halfway through the opening.
#[instrument(skip(tree, frame))]
pub fn frame3d_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    frame: &Frame3dGeometry,
    with_pane: bool,
) -> Result<NodeId, EngineError> {
    let container = tree.insert(parent, Node::container(name))?;
    frame_blueprint(tree, Some(container), "FrontFrame", &frame.front)?;
    frame_blueprint(tree, Some(container), "BackFrame", &frame.back)?;
    palisade_blueprint(tree, Some(container), "OuterPalisade", &frame.outer_palisade)?;
    palisade_blueprint(tree, Some(container), "InnerPalisade", &frame.inner_palisade)?;
    if with_pane {
        tree.add_child(
            container,
            Node::new("WindowPane", Shape::Polygon(frame.pane().to_mesh())),
        )?;
    }
    info!(frame_name = name, "3d frame blueprint laid out");
    Ok(container)
}

/// Polygon leaf holding the closed mesh of a (possibly tapered) prism.
pub fn prism_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    prism: &RegularPrism,
) -> Result<NodeId, EngineError> {
    let mesh = prism.mesh()?;
    tree.insert(parent, Node::new(name, Shape::Polygon(mesh)))
}

fn require_positive(label: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(format!(
            "{label} must be positive, got {value}"
        )))
    }
}

/// Cylinder leaf at the configured resolution.
pub fn cylinder_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    radius: f64,
    height: f64,
    center: Point3,
    config: &BuildConfig,
) -> Result<NodeId, EngineError> {
    require_positive("cylinder radius", radius)?;
    require_positive("cylinder height", height)?;
    let params = CylinderParams {
        radius,
        height,
        resolution: config.resolution,
        center,
    };
    tree.insert(parent, Node::new(name, Shape::Cylinder(params)))
}

/// Cone leaf at the configured resolution. One of the radii may be zero.
#[allow(clippy::too_many_arguments)]
pub fn cone_blueprint(
    tree: &mut BlueprintTree,
    parent: Option<NodeId>,
    name: &str,
    bottom_radius: f64,
    top_radius: f64,
    height: f64,
    center: Point3,
    config: &BuildConfig,
) -> Result<NodeId, EngineError> {
    for (label, r) in [("bottom", bottom_radius), ("top", top_radius)] {
        if !(r.is_finite() && r >= 0.0) {
            return Err(EngineError::config(format!(
                "cone {label} radius must not be negative, got {r}"
            )));
        }
    }
    if bottom_radius == 0.0 && top_radius == 0.0 {
        return Err(EngineError::config("cone needs a non-zero radius"));
    }
    require_positive("cone height", height)?;
    let params = ConeParams {
        bottom_radius,
        top_radius,
        height,
        resolution: config.resolution,
        center,
    };
    tree.insert(parent, Node::new(name, Shape::Cone(params)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shape_ops::ErrorCategory;

    fn names(tree: &BlueprintTree, id: NodeId) -> Vec<String> {
        tree.node(id)
            .unwrap()
            .children()
            .iter()
            .map(|c| tree.node(*c).unwrap().name.clone())
            .collect()
    }

    fn params(thickness: Option<f64>) -> BoxParams {
        BoxParams {
            outer: IntervalBox::new(0.0, 0.7, 0.0, 0.3, 0.0, 0.5),
            thickness,
            big: Side::LeftRight,
            small: Side::BottomTop,
        }
    }

    #[test]
    fn test_box_has_six_named_walls() {
        let mut tree = BlueprintTree::new();
        let id = box_blueprint(&mut tree, None, "crate", &params(None), &BuildConfig::default())
            .unwrap();
        assert_eq!(
            names(&tree, id),
            ["botpart", "leftpart", "rightpart", "toppart", "backpart", "frontpart"]
        );
        let left = tree.find("leftpart").unwrap();
        match &tree.node(left).unwrap().shape {
            Shape::Cuboid(b) => assert_relative_eq!(b.width(), 0.01, epsilon = 1e-12),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_invalid_box_leaves_tree_untouched() {
        let mut tree = BlueprintTree::new();
        let mut bad = params(Some(0.02));
        bad.small = Side::LeftRight;
        let err = box_blueprint(&mut tree, None, "crate", &bad, &BuildConfig::default())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidConfiguration);
        assert!(tree.is_empty());

        let err = box_blueprint(&mut tree, None, "crate", &params(Some(0.2)), &BuildConfig::default())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidConfiguration);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_box_params_from_json() {
        let json = r#"{
            "outer": { "left": 0.0, "right": 1.0, "bottom": 0.0, "top": 1.0,
                       "back": 0.0, "front": 1.0 },
            "big": "BottomTop",
            "small": "BackFront"
        }"#;
        let p: BoxParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.thickness, None);
        assert_eq!(p.big, Side::BottomTop);
        assert_eq!(p.outer.quantum(), 0.001);
    }

    #[test]
    fn test_frame3d_layout() {
        let frame = Frame3dGeometry::new(
            Point3::zeros(),
            1.0,
            1.0,
            0.1,
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            0.05,
        )
        .unwrap();
        let mut tree = BlueprintTree::new();
        let id = frame3d_blueprint(&mut tree, None, "Window", &frame, true).unwrap();
        assert_eq!(
            names(&tree, id),
            ["FrontFrame", "BackFrame", "OuterPalisade", "InnerPalisade", "WindowPane"]
        );
        let front = tree.find("FrontFrame").unwrap();
        assert_eq!(names(&tree, front), FRAME_QUAD_NAMES);
        let outer = tree.find("OuterPalisade").unwrap();
        assert_eq!(names(&tree, outer), ["quad.0", "quad.1", "quad.2", "quad.3"]);
        // container + 2 frames (1 + 4 each) + 2 palisades (1 + 4 each) + pane
        assert_eq!(tree.len(), 1 + 10 + 10 + 1);
    }

    #[test]
    fn test_round_leaves_use_config_resolution() {
        let mut tree = BlueprintTree::new();
        let config = BuildConfig::preview();
        let cyl = cylinder_blueprint(&mut tree, None, "Peg", 0.1, 0.5, Point3::zeros(), &config)
            .unwrap();
        match tree.node(cyl).unwrap().shape {
            Shape::Cylinder(p) => assert_eq!(p.resolution, 16),
            ref other => panic!("unexpected shape {other:?}"),
        }
        assert!(cone_blueprint(&mut tree, None, "Tip", 0.1, 0.0, 0.2, Point3::zeros(), &config)
            .is_ok());
        assert!(cone_blueprint(&mut tree, None, "Bad", 0.0, 0.0, 0.2, Point3::zeros(), &config)
            .is_err());
        assert!(cylinder_blueprint(&mut tree, None, "Bad", -1.0, 0.5, Point3::zeros(), &config)
            .is_err());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_prism_leaf() {
        let mut tree = BlueprintTree::new();
        let prism = RegularPrism::straight(6, 0.2, 0.4, Point3::zeros());
        let id = prism_blueprint(&mut tree, None, "Hex", &prism).unwrap();
        match &tree.node(id).unwrap().shape {
            Shape::Polygon(mesh) => assert_eq!(mesh.faces.len(), 8),
            other => panic!("unexpected shape {other:?}"),
        }
        let bad = RegularPrism::straight(2, 0.2, 0.4, Point3::zeros());
        assert!(prism_blueprint(&mut tree, None, "Bad", &bad).is_err());
    }
}
