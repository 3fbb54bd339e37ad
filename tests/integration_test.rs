use anyhow::Result;
use hyper::{Method, StatusCode};
use outline_viewer::filter::count_nodes;
use outline_viewer::server::{make_http_server, route};
use outline_viewer::{
    export_json, filter_tree, node_at, parse_tree, sample_tree, ContainerBounds, ContentFilter,
    ContentType, DocumentNode, DocumentStore, DocumentTree, Pane, ScrollMetrics, ScrollSynchronizer,
    ScrollViewport, SplitPaneController, SyncOutcome, TreeSource, ViewerShell,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Viewport with fixed extents and a writable offset.
struct TestViewport {
    metrics: ScrollMetrics,
    writes: Vec<f32>,
}

impl TestViewport {
    fn new(scroll_height: f32, client_height: f32) -> Self {
        Self {
            metrics: ScrollMetrics::new(0.0, scroll_height, client_height),
            writes: Vec::new(),
        }
    }
}

impl ScrollViewport for TestViewport {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_scroll_top(&mut self, scroll_top: f32) {
        self.metrics.scroll_top = scroll_top;
        self.writes.push(scroll_top);
    }
}

fn random_type(rng: &mut StdRng) -> Option<ContentType> {
    match rng.gen_range(0..4) {
        0 => None,
        n => Some(ContentType::ALL[n - 1]),
    }
}

fn random_tree(rng: &mut StdRng, depth: usize) -> DocumentTree {
    let mut tree = DocumentTree::new();
    let width = rng.gen_range(0..4);
    for i in 0..width {
        let mut node = DocumentNode::new(random_type(rng)).with_content([format!("line {i}")]);
        if depth > 0 {
            node.children = random_tree(rng, depth - 1);
        }
        tree.insert(format!("Section {depth}.{i}"), node);
    }
    tree
}

/// Every kept section matches or has a kept descendant, and every kept
/// section carries its original content and classification.
fn assert_filtered_subtree(original: &DocumentTree, filtered: &DocumentTree, filter: ContentFilter) {
    for (heading, kept) in filtered {
        let source = original
            .get(heading)
            .unwrap_or_else(|| panic!("'{heading}' not in the original tree"));
        assert_eq!(kept.content, source.content);
        assert_eq!(kept.content_type, source.content_type);
        assert!(filter.accepts(kept.content_type) || !kept.children.is_empty());
        assert_filtered_subtree(&source.children, &kept.children, filter);
    }
}

/// Every section that matches the filter survives.
fn assert_matches_survive(original: &DocumentTree, filtered: &DocumentTree, filter: ContentFilter) {
    for (heading, node) in original {
        match filtered.get(heading) {
            Some(kept) => assert_matches_survive(&node.children, &kept.children, filter),
            None => {
                assert!(!filter.accepts(node.content_type), "matching '{heading}' was dropped");
                assert_eq!(filter_tree(&node.children, filter).len(), 0);
            }
        }
    }
}

fn temp_store(name: &str) -> Result<(PathBuf, DocumentStore)> {
    let root = env::temp_dir().join(format!("outline_viewer_it_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);

    let doc = root.join("paper");
    fs::create_dir_all(doc.join("images"))?;
    fs::write(
        doc.join("output_tree.json"),
        r#"{"Intro":{"content":["hello"],"contentType":"text","children":{}}}"#,
    )?;
    fs::write(doc.join("images").join("fig1.png"), [0x89, b'P', b'N', b'G'])?;
    fs::write(root.join("secret.txt"), "top secret")?;

    Ok((root.clone(), DocumentStore::new(root)))
}

#[test]
fn test_filter_properties_on_random_trees() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let tree = random_tree(&mut rng, 3);
        assert_eq!(filter_tree(&tree, ContentFilter::All), tree);

        for ty in ContentType::ALL {
            let filter = ContentFilter::Only(ty);
            let filtered = filter_tree(&tree, filter);
            assert_filtered_subtree(&tree, &filtered, filter);
            assert_matches_survive(&tree, &filtered, filter);
            assert!(count_nodes(&filtered) <= count_nodes(&tree));
        }
    }
}

#[test]
fn test_table_three_levels_deep_keeps_its_ancestors() -> Result<()> {
    let tree = parse_tree(
        r#"{
            "Results": {
                "content": ["Overview"],
                "contentType": "text",
                "children": {
                    "Experiments": {
                        "content": [],
                        "children": {
                            "Table 1": {"content": ["a | b"], "contentType": "table", "children": {}},
                            "Notes": {"content": ["n"], "contentType": "text", "children": {}}
                        }
                    }
                }
            },
            "Appendix": {"content": ["x"], "contentType": "text", "children": {}}
        }"#,
    )?;

    let filtered = filter_tree(&tree, ContentFilter::Only(ContentType::Table));
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["Results"]);

    let path: Vec<String> = ["Results", "Experiments", "Table 1"].map(String::from).to_vec();
    let table = node_at(&filtered, &path).expect("table survives");
    assert_eq!(table.content, vec!["a | b".to_string()]);

    // Ancestors keep their own content even though they do not match.
    let results = node_at(&filtered, &path[..1]).expect("ancestor survives");
    assert_eq!(results.content, vec!["Overview".to_string()]);
    assert_eq!(results.content_type, Some(ContentType::Text));

    let experiments = node_at(&filtered, &path[..2]).expect("ancestor survives");
    assert_eq!(experiments.children.keys().collect::<Vec<_>>(), vec!["Table 1"]);
    Ok(())
}

#[test]
fn test_filter_without_matches_is_empty() -> Result<()> {
    let tree = sample_tree()?;
    let only_text: DocumentTree = tree
        .iter()
        .filter(|(_, node)| node.content_type == Some(ContentType::Text) && node.children.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    assert!(filter_tree(&only_text, ContentFilter::Only(ContentType::Image)).is_empty());
    assert!(filter_tree(&DocumentTree::new(), ContentFilter::Only(ContentType::Table)).is_empty());
    Ok(())
}

#[test]
fn test_scroll_mirrors_proportionally() {
    let mut sync = ScrollSynchronizer::new();
    let mut outline = TestViewport::new(2000.0, 500.0);
    let mut source = TestViewport::new(10_000.0, 1000.0);

    outline.metrics.scroll_top = 750.0;
    let now = Instant::now();
    let outcome = sync.handle_scroll(Pane::Outline, now, &outline, &mut source);

    assert_eq!(
        outcome,
        SyncOutcome::Mirrored {
            fraction: 0.5,
            target_offset: 4500.0
        }
    );
    assert_eq!(source.writes, vec![4500.0]);
}

#[test]
fn test_echo_report_writes_exactly_once() {
    let mut sync = ScrollSynchronizer::with_quiescence(Duration::from_millis(150));
    let mut outline = TestViewport::new(1500.0, 500.0);
    let mut source = TestViewport::new(3000.0, 1000.0);

    let t0 = Instant::now();
    outline.metrics.scroll_top = 250.0;
    sync.handle_scroll(Pane::Outline, t0, &outline, &mut source);

    // The programmatic write on the source produces its own report.
    let outcome = sync.handle_scroll(Pane::Source, t0 + Duration::from_millis(5), &source, &mut outline);
    assert_eq!(outcome, SyncOutcome::Suppressed);
    assert_eq!(sync.writes(), 1);
    assert!(outline.writes.is_empty());

    // Continuous scrolling keeps the lock alive.
    outline.metrics.scroll_top = 300.0;
    let t1 = t0 + Duration::from_millis(100);
    assert_eq!(sync.handle_scroll(Pane::Outline, t1, &outline, &mut source), SyncOutcome::Suppressed);
    assert!(!sync.poll(t0 + Duration::from_millis(200)));
    assert!(sync.poll(t1 + Duration::from_millis(150)));

    // After quiescence the next report mirrors again.
    outline.metrics.scroll_top = 500.0;
    let outcome = sync.handle_scroll(Pane::Outline, t1 + Duration::from_millis(200), &outline, &mut source);
    assert!(matches!(outcome, SyncOutcome::Mirrored { .. }));
    assert_eq!(sync.writes(), 2);
}

#[test]
fn test_zero_range_reports_fraction_zero() {
    let mut sync = ScrollSynchronizer::new();
    let outline = TestViewport::new(400.0, 500.0);
    let mut source = TestViewport::new(3000.0, 1000.0);

    let outcome = sync.handle_scroll(Pane::Outline, Instant::now(), &outline, &mut source);
    assert_eq!(
        outcome,
        SyncOutcome::Mirrored {
            fraction: 0.0,
            target_offset: 0.0
        }
    );
    assert_eq!(ScrollMetrics::new(10.0, 0.0, 0.0).fraction(), 0.0);
}

#[test]
fn test_split_drag_sets_exact_ratio() {
    let mut split = SplitPaneController::new();
    let bounds = ContainerBounds::new(100.0, 1000.0);

    assert!(!split.update_drag(450.0, bounds));
    split.begin_drag();
    assert!(split.update_drag(450.0, bounds));
    assert_eq!(split.ratio(), 0.35);

    // Out-of-range positions leave the ratio where it was.
    assert!(!split.update_drag(150.0, bounds));
    assert!(!split.update_drag(1000.0, bounds));
    assert_eq!(split.ratio(), 0.35);

    split.end_drag();
    assert!(!split.update_drag(600.0, bounds));
    assert_eq!(split.ratio(), 0.35);
}

#[test]
fn test_export_format_ignores_filter() -> Result<()> {
    let mut tree = DocumentTree::new();
    tree.insert(
        "A".into(),
        DocumentNode::new(Some(ContentType::Text)).with_content(["x"]),
    );
    tree.insert("B".into(), DocumentNode::new(Some(ContentType::Image)));

    let expected = r#"{
  "A": {
    "content": [
      "x"
    ],
    "contentType": "text",
    "children": {}
  },
  "B": {
    "content": [],
    "contentType": "image",
    "children": {}
  }
}"#;
    assert_eq!(export_json(&tree)?, expected);

    let mut shell = ViewerShell::default();
    shell.mount();
    shell.load_document(Some("doc".into()), tree);
    shell.set_filter(ContentFilter::Only(ContentType::Image));
    assert_eq!(shell.visible_count(), 1);
    assert_eq!(shell.export_json()?, expected);
    Ok(())
}

#[test]
fn test_shell_teardown_stops_everything() -> Result<()> {
    let mut shell = ViewerShell::new(Duration::from_millis(150));
    shell.mount();
    shell.load_document(None, sample_tree()?);

    let t0 = Instant::now();
    shell.observe_scroll(Pane::Outline, t0, 0.0, 2000.0, 500.0);
    shell.observe_scroll(Pane::Source, t0, 0.0, 4000.0, 1000.0);
    shell.observe_scroll(Pane::Outline, t0, 300.0, 2000.0, 500.0);
    shell.on_divider_pointer_down();
    assert!(shell.quiescence_remaining(t0).is_some());

    shell.unmount();
    assert!(!shell.is_mounted());
    assert!(shell.listeners().is_empty());
    assert!(shell.quiescence_remaining(t0).is_none());
    assert!(!shell.is_dragging_divider());
    assert_eq!(shell.take_scroll_request(Pane::Source), None);

    // Events after teardown are ignored.
    assert_eq!(shell.observe_scroll(Pane::Outline, t0, 900.0, 2000.0, 500.0), None);
    assert!(!shell.on_pointer_move(300.0, ContainerBounds::new(0.0, 1000.0)));
    assert_eq!(shell.mirrored_writes(), 1);
    Ok(())
}

#[test]
fn test_store_lists_and_rejects_traversal() -> Result<()> {
    let (root, store) = temp_store("store")?;

    let documents = store.list_documents()?;
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "paper");
    assert!(documents[0].has_tree);
    assert_eq!(documents[0].image_count, 1);

    let tree = store.fetch_tree("paper")?;
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Intro"]);

    assert_eq!(store.list_images("paper")?, vec!["fig1.png".to_string()]);
    let (bytes, mime) = store.read_image("paper", "fig1.png")?;
    assert_eq!(bytes.len(), 4);
    assert_eq!(mime, "image/png");

    for bad in ["..", "../secret.txt", "a/b", "a\\b", ""] {
        let err = store.read_image("paper", bad).unwrap_err();
        assert_eq!(err.status_code(), 400, "{bad:?}");
    }
    assert_eq!(store.fetch_tree("..").unwrap_err().status_code(), 400);
    assert_eq!(store.fetch_tree("missing").unwrap_err().status_code(), 404);

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_route_status_codes() -> Result<()> {
    let (root, store) = temp_store("routes")?;

    let cases = [
        ("/api/health", StatusCode::OK),
        ("/health", StatusCode::OK),
        ("/api/documents", StatusCode::OK),
        ("/api/documents/paper", StatusCode::OK),
        ("/api/documents/missing", StatusCode::NOT_FOUND),
        ("/api/documents/paper/images", StatusCode::OK),
        ("/api/documents/paper/images/fig1.png", StatusCode::OK),
        ("/api/documents/paper/images/nope.png", StatusCode::NOT_FOUND),
        ("/api/documents/paper/images/..%2Fsecret.txt", StatusCode::BAD_REQUEST),
        ("/images/paper/images/fig1.png", StatusCode::OK),
        ("/images/paper/images/nope.png", StatusCode::NOT_FOUND),
        ("/images/paper/images/..%2Fsecret.txt", StatusCode::BAD_REQUEST),
        ("/api/unknown", StatusCode::NOT_FOUND),
    ];
    for (path, status) in cases {
        assert_eq!(route(&store, &Method::GET, path).status(), status, "{path}");
    }
    assert_eq!(
        route(&store, &Method::POST, "/api/documents").status(),
        StatusCode::METHOD_NOT_ALLOWED
    );

    let image = route(&store, &Method::GET, "/api/documents/paper/images/fig1.png");
    assert_eq!(image.headers()[hyper::header::CONTENT_TYPE], "image/png");
    let mounted = route(&store, &Method::GET, "/images/paper/images/fig1.png");
    assert_eq!(mounted.headers()[hyper::header::CONTENT_TYPE], "image/png");

    fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn test_live_server_answers_health() -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let (root, store) = temp_store("live")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let response = runtime.block_on(async {
        let server = make_http_server(([127, 0, 0, 1], 0).into(), Arc::new(store)).await?;

        let mut stream = tokio::net::TcpStream::connect(server.addr).await?;
        stream
            .write_all(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await?;
        let mut response = String::new();
        stream.read_to_string(&mut response).await?;

        server.shutdown().await;
        anyhow::Ok(response)
    })?;

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("Server is running"));
    assert!(response.to_ascii_lowercase().contains("access-control-allow-origin: *"));

    fs::remove_dir_all(root)?;
    Ok(())
}
