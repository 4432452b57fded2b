//! Table-wide properties of the detail budgets.

use avakit::{BackendKind, Component, detail};

/// Feature sets and counts must grow monotonically with level, per component
/// and backend: each level's flag set is a superset-or-equal of the previous
/// level's, and counts never decrease.
#[test]
fn monotonic_richness() {
    for backend in BackendKind::ALL {
        for component in Component::ALL {
            for level in 1..10 {
                let lo = detail::resolve(f64::from(level), component, backend);
                let hi = detail::resolve(f64::from(level + 1), component, backend);
                assert!(
                    lo.shape_count <= hi.shape_count,
                    "{component:?}/{backend:?} count shrinks at level {}",
                    level + 1
                );
                for feature in lo.features {
                    assert!(
                        hi.has(*feature),
                        "{component:?}/{backend:?} loses {feature:?} at level {}",
                        level + 1
                    );
                }
            }
        }
    }
}

/// The two backend tables are tuned independently but must agree on which
/// features exist at every level — that parity is what keeps the renderings
/// visually equivalent.
#[test]
fn cross_backend_flag_parity() {
    for component in Component::ALL {
        for level in 1..=10 {
            let v = detail::resolve(f64::from(level), component, BackendKind::Vector);
            let p = detail::resolve(f64::from(level), component, BackendKind::Polygonal);
            assert_eq!(
                v.features, p.features,
                "flag mismatch at {component:?} level {level}"
            );
            assert_eq!(
                v.shape_count == 0,
                p.shape_count == 0,
                "presence mismatch at {component:?} level {level}"
            );
        }
    }
}

#[test]
fn out_of_range_levels_clamp() {
    for backend in BackendKind::ALL {
        for component in Component::ALL {
            assert_eq!(
                detail::resolve(0.0, component, backend),
                detail::resolve(1.0, component, backend)
            );
            assert_eq!(
                detail::resolve(11.0, component, backend),
                detail::resolve(10.0, component, backend)
            );
            assert_eq!(
                detail::resolve(f64::NAN, component, backend),
                detail::resolve(10.0, component, backend)
            );
        }
    }
}

/// The level-1 and level-10 cells pin down the end-to-end scenarios: a bare
/// face against a bare sky at 1, everything at 10.
#[test]
fn extreme_levels_match_scenarios() {
    use avakit::Feature;

    for backend in BackendKind::ALL {
        let bg1 = detail::resolve(1.0, Component::Background, backend);
        assert!(bg1.shape_count >= 1);
        assert!(!bg1.has(Feature::Trees));
        assert!(!bg1.has(Feature::Petals));
        assert_eq!(detail::resolve(1.0, Component::Hair, backend).shape_count, 0);
        assert_eq!(detail::resolve(1.0, Component::Body, backend).shape_count, 0);
        assert_eq!(detail::resolve(1.0, Component::Legs, backend).shape_count, 0);

        assert!(detail::resolve(10.0, Component::Hair, backend).has(Feature::Ahoge));
        assert!(detail::resolve(10.0, Component::Eyes, backend).has(Feature::Sparkle));
        assert!(detail::resolve(10.0, Component::Body, backend).has(Feature::Bow));
        assert!(detail::resolve(10.0, Component::Legs, backend).has(Feature::Socks));
        assert!(detail::resolve(10.0, Component::Background, backend).has(Feature::PowerLines));
    }
}
