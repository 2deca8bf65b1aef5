use super::*;
use crate::geometry::Rect;

fn annotate(dump: &str) -> NodeTree {
    let mut pipeline = AnnotationPipeline::standard();
    pipeline.build(&TreeBuilder::new(), dump).tree
}

fn by_class<'a>(tree: &'a NodeTree, class: &str) -> &'a Node {
    tree.nodes()
        .iter()
        .find(|n| n.class_name == class)
        .unwrap_or_else(|| panic!("no node of class {class}"))
}

#[test]
fn test_standard_pass_order() {
    let pipeline = AnnotationPipeline::standard();
    assert_eq!(pipeline.pass_names(), vec!["xpath", "ad", "covered"]);
}

#[test]
fn test_xpath_sibling_counters() {
    let tree = annotate(
        r#"<hierarchy><node class="P" bounds="[0,0][10,10]">
             <node class="A" bounds="[0,0][1,1]" />
             <node class="A" bounds="[1,0][2,1]" />
             <node class="B" bounds="[2,0][3,1]" />
           </node></hierarchy>"#,
    );
    let xpaths: Vec<&str> = tree.nodes().iter().map(|n| n.xpath.as_str()).collect();
    assert_eq!(xpaths, vec!["/P", "/P/A[1]", "/P/A[2]", "/P/B"]);
}

#[test]
fn test_xpath_counters_are_per_class() {
    let tree = annotate(
        r#"<hierarchy><node class="P" bounds="[0,0][10,10]">
             <node class="A" /><node class="B" /><node class="A" /><node class="B" /><node class="C" />
           </node></hierarchy>"#,
    );
    let xpaths: Vec<&str> = tree.nodes().iter().map(|n| n.xpath.as_str()).collect();
    assert_eq!(
        xpaths,
        vec!["/P", "/P/A[1]", "/P/B[1]", "/P/A[2]", "/P/B[2]", "/P/C"]
    );
}

#[test]
fn test_xpath_nested() {
    let tree = annotate(
        r#"<hierarchy><node class="R"><node class="L"><node class="T" /></node></node></hierarchy>"#,
    );
    assert_eq!(tree.find_by_xpath("/R/L/T").map(|n| n.id()), Some(2));
}

#[test]
fn test_ad_resource_id_heuristics() {
    for id in [
        "com.app:id/banner_ad",
        "com.app:id/top_ads",
        "com.app:id/banner_ad_container",
        "com.app:id/ad_view",
        "com.app:id/fl_adplaceholder",
        "com.app:id/adsContainer",
        "com.app:id/flAdsHolder",
        "ad_root",
    ] {
        assert!(is_ad_resource_id(id), "{id} should be an ad");
    }
    for id in ["", "com.app:id/header", "com.app:id/load", "com.app:id/badge", "com.app:id/shadow"] {
        assert!(!is_ad_resource_id(id), "{id} should not be an ad");
    }
}

#[test]
fn test_ad_propagates_to_descendants() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="Banner" resource-id="com.app:id/banner_ad_container" bounds="[0,0][100,20]">
               <node class="Text" resource-id="com.app:id/title" text="Buy" bounds="[0,0][50,20]">
                 <node class="Deep" bounds="[0,0][10,10]" />
               </node>
               <node class="Button" clickable="true" bounds="[50,0][100,20]" />
             </node>
             <node class="Content" bounds="[0,20][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "Root").is_ad);
    assert!(by_class(&tree, "Banner").is_ad);
    assert!(by_class(&tree, "Text").is_ad);
    assert!(by_class(&tree, "Deep").is_ad);
    assert!(by_class(&tree, "Button").is_ad);
    assert!(!by_class(&tree, "Content").is_ad);
}

#[test]
fn test_later_drawn_sibling_covers() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" package="com.app" bounds="[0,0][100,100]">
             <node class="A" text="below" drawing-order="1" bounds="[0,0][100,50]" />
             <node class="B" drawing-order="2" bounds="[0,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(by_class(&tree, "A").covered);
    assert!(!by_class(&tree, "B").covered);
    assert!(!by_class(&tree, "Root").covered);
}

#[test]
fn test_earlier_drawn_sibling_does_not_cover() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="A" drawing-order="2" bounds="[0,0][100,50]" />
             <node class="B" drawing-order="1" bounds="[0,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "A").covered);
    assert!(!by_class(&tree, "B").covered);
}

#[test]
fn test_invisible_sibling_does_not_cover() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="A" drawing-order="1" bounds="[0,0][100,50]" />
             <node class="Hidden" visible="false" drawing-order="2" bounds="[0,0][100,100]" />
             <node class="Flat" drawing-order="3" bounds="[0,0][100,0]" />
             <node class="android.widget.FrameLayout" drawing-order="4" bounds="[0,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "A").covered);
    assert!(!by_class(&tree, "Hidden").covered);
}

#[test]
fn test_coverage_is_inherited_by_visible_children() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="Under" drawing-order="1" bounds="[0,0][100,50]">
               <node class="Child" bounds="[0,0][50,50]">
                 <node class="Grandchild" bounds="[0,0][10,10]" />
               </node>
               <node class="HiddenChild" visible="false" bounds="[50,0][100,50]" />
             </node>
             <node class="Over" drawing-order="2" bounds="[0,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(by_class(&tree, "Under").covered);
    assert!(by_class(&tree, "Child").covered);
    assert!(by_class(&tree, "Grandchild").covered);
    assert!(!by_class(&tree, "HiddenChild").covered);
}

#[test]
fn test_partial_overlap_hides_grandchild() {
    // Over hides the right half of Under; Under itself stays uncovered but
    // its child living entirely in that half is covered.
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="Under" drawing-order="1" bounds="[0,0][100,50]">
               <node class="LeftChild" bounds="[0,0][50,50]" />
               <node class="RightChild" bounds="[60,10][90,40]" />
             </node>
             <node class="Over" drawing-order="2" bounds="[50,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "Under").covered);
    assert!(!by_class(&tree, "LeftChild").covered);
    assert!(by_class(&tree, "RightChild").covered);
    assert!(!by_class(&tree, "Over").covered);
}

#[test]
fn test_partial_overlaps_do_not_combine_across_siblings() {
    // Each of Top1/Top2 covers half of Below; neither alone contains it.
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="Below" drawing-order="1" bounds="[0,0][100,100]" />
             <node class="Top1" drawing-order="2" bounds="[0,0][50,100]" />
             <node class="Top2" drawing-order="3" bounds="[50,0][100,100]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "Below").covered);
}

#[test]
fn test_equal_drawing_order_uses_source_order() {
    // Same drawing order: A is processed first, so it is the one on top.
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="A" bounds="[0,0][100,100]" />
             <node class="B" bounds="[10,10][50,50]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "A").covered);
    assert!(by_class(&tree, "B").covered);
}

#[test]
fn test_inverted_bounds_never_cover() {
    let tree = annotate(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="A" drawing-order="1" bounds="[10,10][20,20]" />
             <node class="Inverted" drawing-order="2" bounds="[100,100][0,0]" />
           </node></hierarchy>"#,
    );
    assert!(!by_class(&tree, "A").covered);
}

#[test]
fn test_covered_extra_collects_overlaps() {
    let mut tree = TreeBuilder::new().parse(
        r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
             <node class="Under" drawing-order="1" bounds="[0,0][100,50]" />
             <node class="Over" drawing-order="2" bounds="[50,0][100,100]" />
           </node></hierarchy>"#,
    );
    let root_extra = CoveredExtra::default();
    let (root, children) = tree.family_mut(0);
    let mut slots: Vec<ChildSlot<'_, CoveredExtra>> = children
        .into_iter()
        .map(|node| ChildSlot {
            node,
            extra: CoveredExtra::default(),
        })
        .collect();
    CoveredPass.visit(root, &root_extra, &mut slots);

    assert!(slots[1].extra.inherited.is_empty());
    assert_eq!(slots[0].extra.inherited, vec![Rect::new(50, 0, 100, 50)]);
}

struct DepthPass;

impl AnnotationPass for DepthPass {
    type Extra = usize;

    fn name(&self) -> &'static str {
        "depth"
    }

    fn visit(&self, _node: &Node, depth: &usize, children: &mut [ChildSlot<'_, usize>]) {
        for slot in children.iter_mut() {
            slot.extra = depth + 1;
            slot.node.text = format!("depth {}", depth + 1);
        }
    }
}

#[test]
fn test_custom_pass_threads_extra_state() {
    let mut pipeline = AnnotationPipeline::new().with_pass(DepthPass);
    let outcome = pipeline.build(
        &TreeBuilder::new(),
        r#"<hierarchy><node class="R"><node class="A"><node class="B" /></node><node class="C" /></node></hierarchy>"#,
    );
    let texts: Vec<&str> = outcome.tree.nodes().iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["", "depth 1", "depth 2", "depth 1"]);
}

#[test]
fn test_empty_tree_is_untouched() {
    let mut tree = NodeTree::empty();
    AnnotationPipeline::standard().annotate(&mut tree);
    assert!(tree.is_empty());
}

#[test]
fn test_rerun_is_identical() {
    let dump = r#"<hierarchy><node class="Root" bounds="[0,0][100,100]">
         <node class="A" drawing-order="1" bounds="[0,0][100,50]"><node class="X" bounds="[0,0][10,10]" /></node>
         <node class="A" drawing-order="1" bounds="[0,40][100,100]" />
         <node class="B" resource-id="x:id/ad_slot" drawing-order="3" bounds="[20,20][80,80]" />
       </node></hierarchy>"#;
    let first = annotate(dump).to_json_lines().unwrap();
    let second = annotate(dump).to_json_lines().unwrap();
    assert_eq!(first, second);

    let mut tree = TreeBuilder::new().parse(dump);
    let mut pipeline = AnnotationPipeline::standard();
    pipeline.annotate(&mut tree);
    pipeline.annotate(&mut tree);
    assert_eq!(tree.to_json_lines().unwrap(), first);
}
