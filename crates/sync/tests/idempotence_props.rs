//! Property tests: any repository converges in one run and stays converged.

#![cfg(unix)]

use proptest::collection::btree_set;
use proptest::prelude::*;
use skillsync_discovery::{scan_repository, ScanOptions};
use skillsync_sync::{HostOs, PlatformKey, PlatformRegistry, SyncOrchestrator, SyncParams};
use skillsync_test_utils::TestFixture;
use std::fs;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn one_run_converges_and_second_is_noop(
        names in btree_set("[a-z][a-z0-9]{0,6}(-[a-z0-9]{1,4})?", 0..8),
        stale in btree_set("[a-z]{3,6}-stale", 0..3),
    ) {
        let fixture = TestFixture::new().unwrap();
        for name in &names {
            fixture.create_skill(name).unwrap();
        }
        let registry = PlatformRegistry::new(&fixture.home, HostOs::Posix);
        let root = registry.get(PlatformKey::Claude).unwrap().target_root.clone();
        fs::create_dir_all(&root).unwrap();
        for name in &stale {
            std::os::unix::fs::symlink(fixture.repo.join(name), root.join(name)).unwrap();
        }

        let skills = scan_repository(&fixture.repo, &ScanOptions::default()).unwrap();
        let params = SyncParams { dry_run: false, platform: Some(PlatformKey::Claude) };
        let orchestrator = SyncOrchestrator::new(&registry, &skills);

        let first = orchestrator.sync(&params, |_| {});
        prop_assert_eq!(first.created, names.len());
        prop_assert_eq!(first.pruned, stale.len());

        let second = orchestrator.sync(&params, |_| {});
        prop_assert_eq!(second.created + second.updated + second.pruned, 0);
        prop_assert_eq!(second.already_synced, names.len());

        let linked = fs::read_dir(&root).unwrap().count();
        prop_assert_eq!(linked, names.len());
    }
}
