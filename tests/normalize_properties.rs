use authctl::config::{Config, TargetId};
use authctl::target::{Scheme, normalize, normalize_with};
use proptest::prelude::*;

fn hostname() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z][a-zA-Z0-9-]{0,10}[a-zA-Z0-9]", 1..4)
        .prop_map(|labels| labels.join("."))
}

fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z0-9_]{1,8}", 0..3).prop_map(|segments| {
        segments
            .iter()
            .map(|segment| format!("/{segment}"))
            .collect::<String>()
    })
}

fn scheme() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("https"), Just("http")]
}

fn canon(raw: &str) -> TargetId {
    normalize(raw, None).unwrap().unwrap()
}

proptest! {
    #[test]
    fn canonical_form_is_a_fixed_point(
        scheme in scheme(),
        host in hostname(),
        path in path(),
        slashes in 0usize..4,
    ) {
        let raw = format!("{scheme}://{host}{path}{}", "/".repeat(slashes));
        let once = canon(&raw);
        let twice = canon(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn host_case_does_not_matter(scheme in scheme(), host in hostname()) {
        let lower = canon(&format!("{scheme}://{}", host.to_lowercase()));
        let upper = canon(&format!("{scheme}://{}", host.to_uppercase()));
        let mixed = canon(&format!("{scheme}://{host}"));
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(&lower, &mixed);
    }

    #[test]
    fn trailing_slashes_are_stripped(host in hostname(), slashes in 1usize..6) {
        let bare = canon(&format!("https://{host}"));
        let slashed = canon(&format!("https://{host}{}", "/".repeat(slashes)));
        prop_assert!(!slashed.as_str().ends_with('/'));
        prop_assert_eq!(bare, slashed);
    }

    #[test]
    fn default_scheme_matches_explicit(host in hostname()) {
        prop_assert_eq!(normalize(&host, None).unwrap(), None);
        prop_assert_eq!(
            normalize_with(&host, Scheme::Http).unwrap(),
            canon(&format!("http://{host}"))
        );
    }

    #[test]
    fn exactly_one_current_target(
        hosts in proptest::collection::vec(hostname(), 1..8),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..8),
    ) {
        let mut config = Config::default();
        for pick in picks {
            let host = pick.get(&hosts);
            config.set_current_target(normalize_with(host, Scheme::Https).unwrap());
            prop_assert_eq!(config.targets().filter(|(_, entry)| entry.current).count(), 1);
        }
    }
}
