mod common;

use airnav_lib::{
    plan_route, reachable_from, NetworkSummary, ReachabilitySummary, RenderMode, RouteRequest,
    RouteSummary,
};

use common::catalonia;

#[test]
fn route_summary_serialises_steps() {
    let airspace = catalonia();
    let plan = plan_route(&airspace, &RouteRequest::new("GODOX", "ZAR")).unwrap();
    let summary = RouteSummary::from_plan(&airspace, &plan).unwrap();

    let json = serde_json::to_value(&summary).expect("serialise");
    assert_eq!(json["network"], "Catalunya");
    assert_eq!(json["algorithm"], "dijkstra");
    assert_eq!(json["hops"], 3);
    assert_eq!(json["start"]["name"], "GODOX");
    assert_eq!(json["goal"]["key"], 7);
    assert_eq!(json["steps"].as_array().unwrap().len(), 4);
    assert_eq!(json["steps"][1]["name"], "LOBAR");
    assert_eq!(json["steps"][1]["position"]["latitude"], 41.5);
    assert_eq!(json["steps"][0]["leg_cost"], 0.0);

    let last = summary.steps.last().unwrap();
    assert!((last.cumulative_cost - plan.cost).abs() < 1e-9);
}

#[test]
fn plain_render_lists_every_step() {
    let airspace = catalonia();
    let plan = plan_route(&airspace, &RouteRequest::new("GODOX", "ZAR")).unwrap();
    let text = RouteSummary::from_plan(&airspace, &plan)
        .unwrap()
        .render(RenderMode::PlainText);

    assert!(text.starts_with("Route: GODOX -> ZAR (3 hops, cost 303.900, algorithm: dijkstra)"));
    assert!(text.contains("  1: LOBAR (2)"));
    assert!(text.contains("total 303.900"));
}

#[test]
fn reachability_summary_names_nodes() {
    let airspace = catalonia();
    let origin = airspace.node(&9).unwrap();
    let summary = ReachabilitySummary::from_set(&airspace, origin, &reachable_from(&airspace, &9));
    assert_eq!(summary.count, 2);
    assert_eq!(
        summary.render_plain(),
        "Reachable from ISOLA (9): 2 nodes\n  ISOLA (9)\n  ISOLB (10)\n"
    );
}

#[test]
fn network_summary_for_fixture() {
    let summary = NetworkSummary::from_network(&catalonia());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["kind"], "aeronautical");
    assert_eq!(json["nodes"], 11);
    assert_eq!(json["airports"], 3);
}
