use approx::assert_relative_eq;
use proptest::prelude::*;

use blueprint_engine::*;
use blueprint_types::{snap, IntervalBox, Point3, Side};
use scene_backend::{BooleanOp, MockScene, PrimitiveSpec, SceneBackend, SceneEvent};
use shape_ops::{CompositionEngine, ErrorCategory, Frame3dGeometry};

const WALLS: [&str; 6] = [
    "botpart",
    "leftpart",
    "rightpart",
    "toppart",
    "backpart",
    "frontpart",
];

/// 0.70 wide, 0.30 high, 0.50 deep.
fn drawer_params() -> BoxParams {
    BoxParams {
        outer: IntervalBox::new(0.0, 0.70, 0.0, 0.30, 0.0, 0.50),
        thickness: Some(0.02),
        big: Side::LeftRight,
        small: Side::BottomTop,
    }
}

fn cuboid_bounds(scene: &MockScene, name: &str) -> IntervalBox {
    let handle = scene.find(name).unwrap();
    match &scene.object(handle).unwrap().spec {
        PrimitiveSpec::Cuboid { bounds } => *bounds,
        other => panic!("{name} is a {}", other.kind_name()),
    }
}

#[test]
fn test_box_end_to_end() {
    let mut bench = Workbench::new(BuildConfig::default()).unwrap();
    let id = box_blueprint(&mut bench.tree, None, "Drawer", &drawer_params(), &bench.config)
        .unwrap();
    let mut scene = MockScene::new();
    let handles = bench.build(&mut scene).unwrap();

    assert_eq!(handles, vec![bench.tree.handle(id).unwrap()]);
    assert_eq!(scene.len(), 7);
    let container = scene.find("Drawer").unwrap();
    let children: Vec<String> = scene
        .children_of(container)
        .into_iter()
        .map(|h| scene.object(h).unwrap().name.clone())
        .collect();
    assert_eq!(children, WALLS);

    for side in ["leftpart", "rightpart"] {
        let b = cuboid_bounds(&scene, side);
        assert_relative_eq!(b.depth(), 0.50, epsilon = 1e-9);
        assert_relative_eq!(b.height(), 0.30, epsilon = 1e-9);
    }
    for flat in ["botpart", "toppart"] {
        let b = cuboid_bounds(&scene, flat);
        assert_relative_eq!(b.width(), 0.66, epsilon = 1e-9);
        assert_relative_eq!(b.depth(), 0.46, epsilon = 1e-9);
    }
    assert_relative_eq!(cuboid_bounds(&scene, "toppart").bottom(), 0.28, epsilon = 1e-12);
}

#[test]
fn test_container_offset_moves_walls() {
    let mut tree = BlueprintTree::new();
    let config = BuildConfig::default();
    let id = box_blueprint(&mut tree, None, "Drawer", &drawer_params(), &config).unwrap();
    tree.set_offset(id, Point3::new(0.0, 0.0, 0.75)).unwrap();
    let mut scene = MockScene::new();
    instantiate(&mut tree, id, &mut scene, &config).unwrap();

    let wall = scene.find("toppart").unwrap();
    assert_relative_eq!(
        scene.world_translation(wall).unwrap(),
        Point3::new(0.0, 0.0, 0.75),
        epsilon = 1e-12
    );
}

#[test]
fn test_backend_failure_aborts_walk() {
    let mut tree = BlueprintTree::new();
    let config = BuildConfig::default();
    let id = box_blueprint(&mut tree, None, "Drawer", &drawer_params(), &config).unwrap();
    let mut scene = MockScene::new();
    scene.reject_primitives_named("toppart");

    let err = instantiate(&mut tree, id, &mut scene, &config).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::BackendFailure);
    // Container plus the three walls created before the rejected one.
    assert_eq!(scene.len(), 4);
    assert!(scene.find("backpart").is_none());
    assert!(tree.handle(tree.find("rightpart").unwrap()).is_some());
    assert!(tree.handle(tree.find("frontpart").unwrap()).is_none());
}

#[test]
fn test_linked_root_needs_parent_built_first() {
    let mut tree = BlueprintTree::new();
    let config = BuildConfig::default();
    let lid = tree.add_root(Node::new("Lid", Shape::Cuboid(IntervalBox::unit())));
    let base = tree.add_root(Node::container("Base"));
    tree.link_parent(lid, base).unwrap();

    let mut scene = MockScene::new();
    let err = instantiate_all(&mut tree, &mut scene, &config).unwrap_err();
    assert_eq!(
        err,
        EngineError::ParentNotBuilt {
            name: "Lid".into(),
            parent: "Base".into()
        }
    );
    assert!(scene.events().is_empty());

    let base_handle = instantiate(&mut tree, base, &mut scene, &config).unwrap();
    let lid_handle = instantiate(&mut tree, lid, &mut scene, &config).unwrap();
    assert_eq!(scene.object(lid_handle).unwrap().parent, Some(base_handle));
}

#[test]
fn test_composition_post_pass() {
    let mut bench = Workbench::new(BuildConfig::preview()).unwrap();
    let block = bench
        .tree
        .add_root(Node::new("Block", Shape::Cuboid(IntervalBox::unit())));
    let hole = cylinder_blueprint(
        &mut bench.tree,
        None,
        "Hole",
        0.2,
        1.0,
        Point3::new(0.5, 0.5, 0.5),
        &bench.config,
    )
    .unwrap();
    let mut scene = MockScene::new();
    bench.build(&mut scene).unwrap();

    let engine = CompositionEngine::new(BooleanOp::Difference).consume_operands(true);
    let result = bench.compose(&[block, hole], &mut scene, &engine).unwrap();

    assert_eq!(Some(result), bench.tree.handle(block));
    let obj = scene.object(result).unwrap();
    assert_eq!(obj.modifiers.len(), 1);
    assert_eq!(obj.modifiers[0].operand_name, "Hole");
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_hidden_accumulator_is_a_backend_failure() {
    let mut tree = BlueprintTree::new();
    let a = tree.add_root(Node::new("A", Shape::Cuboid(IntervalBox::unit())));
    let b = tree.add_root(Node::new("B", Shape::Cuboid(IntervalBox::unit())));
    let mut scene = MockScene::new();
    instantiate_all(&mut tree, &mut scene, &BuildConfig::default()).unwrap();
    scene.set_visible(tree.handle(a).unwrap(), false).unwrap();

    let err = compose(&tree, &[a, b], &mut scene, &CompositionEngine::new(BooleanOp::Union))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::BackendFailure);
}

#[test]
fn test_reset_allows_rebuild() {
    let mut bench = Workbench::new(BuildConfig::default()).unwrap();
    box_blueprint(&mut bench.tree, None, "Drawer", &drawer_params(), &bench.config).unwrap();
    let mut scene = MockScene::new();
    bench.build(&mut scene).unwrap();
    assert!(bench.build(&mut scene).is_err());

    bench.reset(&mut scene).unwrap();
    assert!(scene.is_empty());
    bench.build(&mut scene).unwrap();
    assert_eq!(scene.len(), 7);
    assert!(scene.events().contains(&SceneEvent::Reset));
}

#[test]
fn test_window_frame_scene() {
    let frame = Frame3dGeometry::new(
        Point3::zeros(),
        1.235,
        1.27,
        0.069,
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        0.014,
    )
    .unwrap();
    let mut bench = Workbench::default();
    frame3d_blueprint(&mut bench.tree, None, "Window", &frame, true).unwrap();
    let mut scene = MockScene::new();
    bench.build(&mut scene).unwrap();

    assert_eq!(scene.len(), bench.tree.len());
    let window = scene.find("Window").unwrap();
    assert_eq!(scene.children_of(window).len(), 5);
    // Both frames have a BotQuad; the second gets a suffix.
    assert!(scene.find("BotQuad").is_some());
    assert!(scene.find("BotQuad.001").is_some());
    let pane = scene.find("WindowPane").unwrap();
    assert!(matches!(
        scene.object(pane).unwrap().spec,
        PrimitiveSpec::Polygon { .. }
    ));
}

proptest! {
    #[test]
    fn built_box_walls_fill_the_shell(
        w in 100u32..2000, h in 100u32..2000, d in 100u32..2000,
        t in 10u32..=400,
        pick in 0usize..6,
    ) {
        let pairs = [
            (Side::BottomTop, Side::LeftRight),
            (Side::BottomTop, Side::BackFront),
            (Side::LeftRight, Side::BottomTop),
            (Side::LeftRight, Side::BackFront),
            (Side::BackFront, Side::BottomTop),
            (Side::BackFront, Side::LeftRight),
        ];
        let (big, small) = pairs[pick];
        let (w, h, d, t) = (w as f64 / 1000.0, h as f64 / 1000.0, d as f64 / 1000.0, t as f64 / 10_000.0);
        let params = BoxParams {
            outer: IntervalBox::from_origin(Point3::zeros(), w, h, d),
            thickness: Some(t),
            big,
            small,
        };
        let mut tree = BlueprintTree::new();
        let config = BuildConfig::default();
        let id = box_blueprint(&mut tree, None, "Box", &params, &config).unwrap();
        let mut scene = MockScene::new();
        instantiate(&mut tree, id, &mut scene, &config).unwrap();

        prop_assert_eq!(scene.len(), 7);
        let total: f64 = WALLS.iter().map(|n| cuboid_bounds(&scene, n).volume()).sum();
        let t = snap(t, config.quantum);
        let expected = w * h * d - (w - 2.0 * t) * (h - 2.0 * t) * (d - 2.0 * t);
        let outer = params.outer;
        for n in WALLS {
            let b = cuboid_bounds(&scene, n);
            for s in Side::ALL {
                prop_assert!(b.lower(s) >= outer.lower(s) - 1e-9 && b.upper(s) <= outer.upper(s) + 1e-9);
            }
        }
        prop_assert!((total - expected).abs() < 1e-7);
    }
}
