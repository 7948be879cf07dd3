//! Behavioral properties of normalization, validation and flattening.

use docnav_tree::{
    ConfigError, LinkPolicy, LinkResolver, NavItem, NavigationConfig, NavigationTree, unflatten,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn link_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
        "/[a-z_]{1,8}(/[a-z]{1,6}){0,3}/?",
        "(/|//|\\./|\\.\\./)?([a-z_.]{0,6}/{1,2}){0,4}(index|index\\.md|[a-z]{1,5}\\.html)?/?([?#][a-z/]{0,4})?",
        "(https://|mailto:)[a-z./]{1,12}",
    ]
}

fn base_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_owned()),
        Just("/hello_vulkan/".to_owned()),
        Just("/index/".to_owned()),
        "/[a-z]{1,5}(/[a-z]{1,5})?/?",
    ]
}

fn policy_strategy() -> impl Strategy<Value = LinkPolicy> {
    any::<(bool, bool, bool)>().prop_map(
        |(trailing_slash_equivalent, strip_index, strip_extension)| LinkPolicy {
            trailing_slash_equivalent,
            strip_index,
            strip_extension,
        },
    )
}

/// Random sidebar trees; links are made unique afterwards.
fn sidebar_strategy() -> impl Strategy<Value = Vec<NavItem>> {
    let leaf = ("[A-Za-z]{1,8}", proptest::option::of("[a-z]{1,6}")).prop_map(|(label, link)| {
        NavItem {
            label,
            link,
            ..NavItem::default()
        }
    });
    let item = leaf.prop_recursive(4, 40, 4, |inner| {
        (
            "[A-Za-z]{1,8}",
            proptest::option::of("[a-z]{1,6}"),
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(label, link, children)| NavItem {
                label,
                link,
                children,
                ..NavItem::default()
            })
    });
    proptest::collection::vec(item, 0..5).prop_map(|mut items| {
        let mut counter = 0;
        make_links_unique(&mut items, &mut counter);
        items
    })
}

/// Give every linked or childless entry a distinct absolute link.
fn make_links_unique(items: &mut [NavItem], counter: &mut usize) {
    for item in items {
        *counter += 1;
        let stem = item.link.take().unwrap_or_else(|| "page".to_owned());
        if item.children.is_empty() || *counter % 2 == 0 {
            item.link = Some(format!("/{stem}/{counter}"));
        }
        make_links_unique(&mut item.children, counter);
    }
}

/// Same tree with every link replaced by its normalized form.
fn resolve_links(items: &[NavItem], resolver: &LinkResolver) -> Vec<NavItem> {
    items
        .iter()
        .map(|item| NavItem {
            link: item.target().map(|link| resolver.resolve(link).into_string()),
            children: resolve_links(&item.children, resolver),
            ..item.clone()
        })
        .collect()
}

fn config(base_path: &str, sidebar: Vec<NavItem>) -> NavigationConfig {
    NavigationConfig {
        title: "Hello Vulkan".to_owned(),
        base_path: base_path.to_owned(),
        sidebar,
        ..NavigationConfig::default()
    }
}

proptest! {
    #[test]
    fn test_normalization_is_idempotent(
        link in link_strategy(),
        base in base_strategy(),
        policy in policy_strategy(),
    ) {
        let resolver = LinkResolver::new(&base, policy);

        let once = resolver.resolve(&link);
        let twice = resolver.resolve(once.as_str());

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_resolved_internal_links_are_under_base(
        link in link_strategy(),
        base in base_strategy(),
    ) {
        let resolver = LinkResolver::new(&base, LinkPolicy::default());

        let path = resolver.resolve(&link);

        prop_assume!(!path.is_external());
        prop_assert!(!resolver.is_outside_base(path.as_str()));
    }

    #[test]
    fn test_flatten_round_trip(sidebar in sidebar_strategy(), base in base_strategy()) {
        let tree = NavigationTree::new().build(config(&base, sidebar.clone())).unwrap();

        let rebuilt = unflatten(tree.flatten()).unwrap();

        prop_assert_eq!(&rebuilt, &resolve_links(&sidebar, tree.resolver()));

        let again = NavigationTree::new().build(config(&base, rebuilt)).unwrap();
        let mut original_links: Vec<_> = tree.links().collect();
        let mut rebuilt_links: Vec<_> = again.links().collect();
        original_links.sort();
        rebuilt_links.sort();
        prop_assert_eq!(rebuilt_links, original_links);
    }

    #[test]
    fn test_flatten_preserves_declared_order(sidebar in sidebar_strategy()) {
        fn pre_order<'a>(items: &'a [NavItem], out: &mut Vec<&'a str>) {
            for item in items {
                out.push(&item.label);
                pre_order(&item.children, out);
            }
        }
        let mut expected = Vec::new();
        pre_order(&sidebar, &mut expected);
        let tree = NavigationTree::new().build(config("/", sidebar.clone())).unwrap();

        let labels: Vec<_> = tree.flatten().map(|entry| entry.label).collect();

        prop_assert_eq!(labels, expected);
    }
}

#[test]
fn test_base_path_resolution() {
    let tree = NavigationTree::new()
        .build(config(
            "/hello_vulkan/",
            vec![NavItem::page("instance", "/vulkan/device/instance")],
        ))
        .unwrap();

    let path = tree.resolve_link(&tree.sidebar()[0]).unwrap();

    assert_eq!(path.as_str(), "/hello_vulkan/vulkan/device/instance");
}

#[test]
fn test_trailing_slash_duplicate_reported_once() {
    let sidebar = vec![
        NavItem::group(
            "Pipeline",
            vec![NavItem::page("SPIR-V", "/vulkan/pipeline/spv")],
        ),
        NavItem::group(
            "Shaders",
            vec![NavItem::page("spv", "/vulkan/pipeline/spv/")],
        ),
    ];

    let issues = NavigationTree::new().validate(&config("/", sidebar));

    let duplicates: Vec<_> = issues
        .iter()
        .filter_map(|issue| match issue {
            ConfigError::DuplicateLink { first, second, .. } => {
                Some((first.as_str(), second.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(duplicates, vec![("SPIR-V", "spv")]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_dead_end_rejected() {
    let sidebar = vec![NavItem {
        label: "Shader".to_owned(),
        children: Vec::new(),
        ..NavItem::default()
    }];

    let err = NavigationTree::new()
        .build(config("/", sidebar))
        .unwrap_err();

    assert!(matches!(
        err.issues(),
        [ConfigError::DeadEndEntry { label, .. }] if label == "Shader"
    ));
}

#[test]
fn test_warnings_do_not_block_build() {
    let sidebar = vec![
        NavItem::page("instance", "/vulkan/device/instance"),
        NavItem::page("swapchain", "/hello_vulkan/vulkan/swapchain"),
    ];

    let tree = NavigationTree::new()
        .build(config("/hello_vulkan/", sidebar))
        .unwrap();

    assert_eq!(tree.warnings().len(), 1);
    assert_eq!(tree.pages().count(), 2);
}

#[test]
fn test_config_from_json_builds() {
    let json = r#"{
        "title": "Hello Vulkan",
        "description": "Vulkan notes",
        "basePath": "/hello_vulkan/",
        "topNav": [{"label": "Home", "link": "/hello_vulkan/"}],
        "sidebar": [
            {"label": "Device", "children": [
                {"label": "instance", "link": "/hello_vulkan/vulkan/device/instance"},
                {"label": "physical", "link": "vulkan/device/physical"}
            ]},
            {"label": "Pipeline", "link": "/hello_vulkan/vulkan/pipeline/", "children": [
                {"label": "spv", "link": "/hello_vulkan/vulkan/pipeline/spv.md"}
            ]}
        ],
        "socialLinks": [{"icon": "github", "url": "https://github.com/example/hello_vulkan"}]
    }"#;
    let config: NavigationConfig = serde_json::from_str(json).unwrap();

    let tree = NavigationTree::new().build(config).unwrap();

    let paths: Vec<_> = tree
        .pages()
        .map(|page| page.path.unwrap().into_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/hello_vulkan/vulkan/device/instance",
            "/hello_vulkan/vulkan/device/physical",
            "/hello_vulkan/vulkan/pipeline",
            "/hello_vulkan/vulkan/pipeline/spv",
        ]
    );
    assert!(tree.warnings().is_empty());
}
