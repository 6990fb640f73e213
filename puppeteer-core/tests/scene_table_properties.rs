use proptest::prelude::*;
use puppeteer_core::scheduler::{DelayPolicy, Scene, SceneError, SceneTable, MAX_SCENES};

fn scene_strategy() -> impl Strategy<Value = Scene> {
    (0usize..Scene::ALL.len()).prop_map(|i| Scene::ALL[i])
}

proptest! {
    #[test]
    fn table_never_exceeds_limit(
        limit in 0usize..=MAX_SCENES + 10,
        scenes in prop::collection::vec(scene_strategy(), 0..150),
    ) {
        let mut table = SceneTable::with_limit(limit);

        for scene in scenes {
            let before = table.entries().to_vec();
            match table.add(scene, None, 1, DelayPolicy::default()) {
                Ok(()) => {
                    let added = if scene.is_compound() { 2 } else { 1 };
                    prop_assert_eq!(table.len(), before.len() + added);
                    prop_assert_eq!(&table.entries()[..before.len()], before.as_slice());
                }
                Err(err) => {
                    prop_assert_eq!(err, SceneError::CapacityExceeded);
                    prop_assert_eq!(table.entries(), before.as_slice());
                }
            }
            prop_assert!(table.len() <= limit.min(MAX_SCENES));
        }
    }

    #[test]
    fn compound_scenes_never_reach_the_table(
        scenes in prop::collection::vec(scene_strategy(), 0..40),
    ) {
        let mut table = SceneTable::new();
        for scene in scenes {
            let _ = table.add(scene, Some(20), 3, DelayPolicy::Immediate);
        }
        for entry in table.entries() {
            prop_assert!(entry.scene.scene().is_some_and(|s| !s.is_compound()));
        }
    }
}
