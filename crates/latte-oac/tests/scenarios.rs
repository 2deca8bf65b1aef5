//! End-to-end analysis of small captures.

use latte_oac::{Analyzer, Oac};

const PACKAGE: &str = "com.app";

#[test]
fn later_sibling_covers_earlier_one() {
    let dump = r#"<hierarchy rotation="0">
      <node index="0" class="android.widget.FrameLayout" package="com.app" bounds="[0,0][100,100]">
        <node index="0" class="android.widget.TextView" package="com.app" text="A" drawing-order="1" bounds="[0,0][100,50]" />
        <node index="1" class="android.widget.TextView" package="com.app" text="B" drawing-order="2" bounds="[0,0][100,100]" />
      </node>
    </hierarchy>"#;
    let analysis = Analyzer::default().analyze(dump, PACKAGE);
    let tree = &analysis.tree;

    let a = tree.find(|n| n.text == "A")[0];
    let b = tree.find(|n| n.text == "B")[0];
    assert!(a.covered);
    assert!(!b.covered);
    assert_eq!(analysis.report.conditions_for(a.id()), &[Oac::P3Covered, Oac::A1PInvisible]);
    assert!(analysis.report.conditions_for(b.id()).is_empty());
}

#[test]
fn ad_container_and_children_are_ads() {
    let dump = r#"<hierarchy rotation="0">
      <node class="android.widget.FrameLayout" package="com.app" bounds="[0,0][100,100]">
        <node class="android.widget.FrameLayout" package="com.app" resource-id="com.app:id/banner_ad_container" bounds="[0,0][100,20]">
          <node class="android.widget.TextView" package="com.adnetwork" text="Sponsored" bounds="[0,0][50,20]" />
          <node class="android.widget.Button" package="com.adnetwork" clickable="true" enabled="false" bounds="[50,0][100,20]" />
        </node>
      </node>
    </hierarchy>"#;
    let analysis = Analyzer::default().analyze(dump, PACKAGE);
    let tree = &analysis.tree;
    let report = &analysis.report;

    let container = tree.find_by_resource_id("banner_ad_container")[0];
    assert!(container.is_ad);
    let children: Vec<_> = tree.children(container.id()).collect();
    assert_eq!(children.len(), 2);
    for child in children {
        assert!(child.is_ad);
        assert_eq!(report.conditions_for(child.id()), &[Oac::OAd]);
    }
    for p in Oac::P_FAMILY {
        assert_eq!(report.count(p), 0);
    }
    assert_eq!(report.count(Oac::A2ConditionalDisabled), 0);
    assert_eq!(report.count(Oac::OAd), 2);
}

#[test]
fn click_action_without_clickable_flag() {
    let dump = r#"<hierarchy>
      <node class="android.widget.FrameLayout" package="com.app" bounds="[0,0][1080,1920]">
        <node class="android.view.View" package="com.app" clickable="false" visible-to-user="true" a11yActions="16" bounds="[100,100][300,300]" />
      </node>
    </hierarchy>"#;
    let analysis = Analyzer::default().analyze(dump, PACKAGE);
    assert_eq!(analysis.report.nodes_for(Oac::A3InconsistentAbilities), &[1]);
    assert_eq!(analysis.report.conditions_for(1), &[Oac::A3InconsistentAbilities]);
}

#[test]
fn garbage_dump_gives_zero_counts() {
    for dump in ["", "not xml at all", "<<<>>>", "<hierarchy>"] {
        let analysis = Analyzer::default().analyze(dump, PACKAGE);
        assert!(analysis.tree.is_empty());
        assert!(analysis.report.screen().is_none());
        let counts = analysis.report.count_map();
        assert_eq!(counts.len(), 10);
        assert!(counts.values().all(|c| *c == 0), "{dump}: {counts:?}");
    }
}

#[test]
fn extra_container_classes_from_config() {
    let dump = r#"<hierarchy>
      <node class="android.widget.FrameLayout" package="com.app" bounds="[0,0][100,100]">
        <node class="android.widget.TextView" package="com.app" text="Under" drawing-order="1" bounds="[0,0][100,100]" />
        <node class="com.app.Card" package="com.app" drawing-order="2" bounds="[0,0][100,100]" />
      </node>
    </hierarchy>"#;

    let plain = Analyzer::default().analyze(dump, PACKAGE);
    assert_eq!(plain.report.count(Oac::P3Covered), 1);

    let mut config = latte_config::AnalysisConfig::default();
    config.extra_container_classes = vec!["com.app.Card".to_string()];
    let tuned = Analyzer::from_config(&config).analyze(dump, PACKAGE);
    assert_eq!(tuned.report.count(Oac::P3Covered), 0);
}

#[test]
fn full_range_bounds_are_out_of_bounds() {
    let dump = r#"<hierarchy>
      <node class="android.widget.FrameLayout" package="com.app" bounds="[0,0][1080,1920]">
        <node class="android.widget.TextView" package="com.app" text="Huge" bounds="[-2147483648,-2147483648][2147483647,2147483647]" />
        <node class="android.widget.TextView" package="com.app" text="Under" bounds="[0,0][100,100]" />
      </node>
    </hierarchy>"#;
    let analysis = Analyzer::default().analyze(dump, PACKAGE);
    assert_eq!(analysis.tree.len(), 3);
    assert_eq!(
        analysis.report.conditions_for(1),
        &[Oac::P2OutOfBounds, Oac::A1PInvisible]
    );
    assert!(analysis.tree.get(2).unwrap().covered);
}
