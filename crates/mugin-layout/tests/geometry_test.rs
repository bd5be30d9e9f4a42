use float_cmp::approx_eq;
use mugin_core::{Flow, NodeGeometry};
use mugin_layout::ellipse::{Ellipse, correct_radius};
use mugin_layout::geom::point;
use mugin_layout::{EdgeKind, LayoutConfig, correct_link};
use serde_json::json;

fn node(x: f64, y: f64, rx: f64, fixed: bool) -> NodeGeometry {
    NodeGeometry {
        x,
        y,
        rx,
        ry: 30.0,
        fixed,
    }
}

fn assert_on_boundary(node: &NodeGeometry, margin: f64, x: f64, y: f64) {
    let e = Ellipse::around(node, margin);
    let d = e.normalized_distance(point(x, y));
    assert!(
        approx_eq!(f64, d, 1.0, epsilon = 1e-9),
        "({x}, {y}) is not on the boundary: {d}"
    );
}

#[test]
fn correct_radius_adds_arrow_and_free_margins() {
    let cfg = LayoutConfig::default();
    assert_eq!(correct_radius(&node(0.0, 0.0, 30.0, true), false, &cfg), 1.0);
    assert_eq!(correct_radius(&node(0.0, 0.0, 30.0, true), true, &cfg), 3.0);
    assert_eq!(correct_radius(&node(0.0, 0.0, 30.0, false), false, &cfg), 2.0);
    assert_eq!(correct_radius(&node(0.0, 0.0, 30.0, false), true, &cfg), 4.0);
}

#[test]
fn ellipse_radius_matches_axes() {
    let e = Ellipse::new(point(0.0, 0.0), 50.0, 20.0);
    assert!(approx_eq!(f64, e.radius_at(0.0), 50.0, epsilon = 1e-12));
    assert!(approx_eq!(
        f64,
        e.radius_at(std::f64::consts::FRAC_PI_2),
        20.0,
        epsilon = 1e-12
    ));
    assert!(e.contains(point(49.0, 0.0)));
    assert!(!e.contains(point(0.0, 21.0)));
}

#[test]
fn singleton_inform_link_is_trimmed_to_both_boundaries() {
    let cfg = LayoutConfig::default();
    let s = node(0.0, 0.0, 30.0, false);
    let t = node(200.0, 0.0, 30.0, false);
    let g = correct_link(&s, &t, Flow::Inform, 1, &cfg);

    assert!(approx_eq!(f64, g.x0, 32.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, g.x1, 166.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, g.y0, 0.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, g.y1, 0.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, g.dx, 134.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, g.dr, 1.4 * 134.0, epsilon = 1e-9));
}

#[test]
fn endpoints_lie_on_margin_adjusted_ellipses() {
    let cfg = LayoutConfig::default();
    let cases = [
        (node(10.0, 20.0, 45.0, false), node(260.0, 180.0, 30.0, true)),
        (node(300.0, 40.0, 80.0, true), node(120.0, 300.0, 36.0, false)),
        (node(0.0, 0.0, 30.0, false), node(0.0, -150.0, 64.0, false)),
    ];
    for (s, t) in cases {
        for (flow, weight) in [(Flow::Inform, 1), (Flow::Inform, 2), (Flow::Connect, 3)] {
            let g = correct_link(&s, &t, flow, weight, &cfg);
            let start_arrow = flow == Flow::Connect;
            assert_on_boundary(&s, correct_radius(&s, start_arrow, &cfg), g.x0, g.y0);
            assert_on_boundary(&t, correct_radius(&t, true, &cfg), g.x1, g.y1);
            assert!(approx_eq!(f64, g.dr, 1.4 * g.dx.hypot(g.dy), epsilon = 1e-9));
        }
    }
}

#[test]
fn parallel_inform_links_bow_to_one_side() {
    let cfg = LayoutConfig::default();
    let s = node(0.0, 0.0, 30.0, true);
    let t = node(200.0, 0.0, 30.0, true);

    let forward = correct_link(&s, &t, Flow::Inform, 2, &cfg);
    assert!(forward.y0 < 0.0);
    assert!(forward.y1 < 0.0);

    // The reverse link's ends rotate the other way in screen space.
    let back = correct_link(&t, &s, Flow::Inform, 2, &cfg);
    assert!(back.y0 > 0.0);
    assert!(back.y1 > 0.0);

    let connect = correct_link(&s, &t, Flow::Connect, 2, &cfg);
    assert!(approx_eq!(f64, connect.y0, 0.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, connect.y1, 0.0, epsilon = 1e-9));
}

#[test]
fn line_or_arc_selection() {
    assert_eq!(EdgeKind::for_link(Flow::Inform, 1), EdgeKind::Line);
    assert_eq!(EdgeKind::for_link(Flow::Connect, 1), EdgeKind::Line);
    assert_eq!(EdgeKind::for_link(Flow::Inform, 2), EdgeKind::Arc);
    assert_eq!(EdgeKind::for_link(Flow::Inform, 3), EdgeKind::Arc);
    assert_eq!(EdgeKind::for_link(Flow::Connect, 3), EdgeKind::Line);
}

#[test]
fn default_spread_matches_the_arc_tangent() {
    let cfg = LayoutConfig::default();
    let expected = 2.0 * (1.0_f64 / 2.8).asin();
    assert!(approx_eq!(f64, cfg.spread(), expected, epsilon = 1e-12));
}

#[test]
fn layout_config_overrides() {
    let cfg = LayoutConfig::default()
        .with_overrides(&json!({ "arcFactor": 1.0, "viewport": { "width": 800.0 } }))
        .unwrap();
    assert_eq!(cfg.arc_factor, 1.0);
    assert_eq!(cfg.viewport.width, 800.0);
    assert_eq!(cfg.viewport.height, 500.0);
    assert!(approx_eq!(
        f64,
        cfg.spread(),
        std::f64::consts::FRAC_PI_3,
        epsilon = 1e-12
    ));

    let fixed = cfg.with_overrides(&json!({ "angularSpread": 0.5 })).unwrap();
    assert_eq!(fixed.spread(), 0.5);

    assert!(
        LayoutConfig::default()
            .with_overrides(&json!({ "arcFactor": "wide" }))
            .is_err()
    );
}
