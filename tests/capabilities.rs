// ABOUTME: Integration tests for engine capability probes.
// ABOUTME: Covers runtime info caching, compose gating, liveness, groups and networking.

mod support;

use hostready::runtime::{ContainerRuntime, EngineKind, NetworkMode, RuntimeSettings};
use std::sync::Arc;
use support::ScriptedRunner;

const DOCKER_VERSION: &str = "docker --version";
const PODMAN_VERSION: &str = "podman --version";

fn docker_host() -> Arc<ScriptedRunner> {
    let runner = ScriptedRunner::new();
    runner.ok(DOCKER_VERSION, "Docker version 27.1.1, build 6312585\n");
    runner
}

fn podman_host(version: &str) -> Arc<ScriptedRunner> {
    let runner = ScriptedRunner::new();
    runner.ok(PODMAN_VERSION, &format!("{version}\n"));
    runner
}

mod info {
    use super::*;

    #[tokio::test]
    async fn reports_version_and_compose_v2() {
        let runner = docker_host();
        runner.ok("docker compose version", "Docker Compose version v2.5.1\n");
        let runtime = ContainerRuntime::new(runner.clone());

        let info = runtime.info().await.expect("docker is installed");
        assert_eq!(info.kind, EngineKind::Docker);
        assert_eq!(info.version, "Docker version 27.1.1, build 6312585");
        assert!(info.compose_installed);
        assert_eq!(info.compose_version.as_deref(), Some("2.5.1"));
    }

    #[tokio::test]
    async fn compose_v1_is_not_installed() {
        let runner = docker_host();
        runner.ok("docker compose version", "docker-compose version 1.29.0\n");
        let runtime = ContainerRuntime::new(runner);

        let info = runtime.info().await.unwrap();
        assert!(!info.compose_installed);
    }

    #[tokio::test]
    async fn missing_compose_does_not_abort_probe() {
        let runner = podman_host("podman version 5.2.2");
        runner.fail("podman compose version", 125, "Error: unrecognized command");
        let runtime = ContainerRuntime::new(runner);

        let info = runtime.info().await.expect("info without compose");
        assert_eq!(info.kind, EngineKind::Podman);
        assert!(!info.compose_installed);
        assert_eq!(info.compose_version, None);
    }

    #[tokio::test]
    async fn none_without_engine() {
        let runtime = ContainerRuntime::new(ScriptedRunner::new());
        assert_eq!(runtime.info().await, None);
    }

    #[tokio::test]
    async fn served_from_cache() {
        let runner = docker_host();
        runner.ok("docker compose version", "Docker Compose version v2.5.1\n");
        let runtime = ContainerRuntime::new(runner.clone());

        let first = runtime.info().await;
        let second = runtime.info().await;

        assert_eq!(first, second);
        assert_eq!(runner.count("docker compose version"), 1);
        assert_eq!(runner.count(DOCKER_VERSION), 2, "detect plus one version probe");
    }

    #[tokio::test]
    async fn reset_reprobes_and_never_serves_stale_kind() {
        let runner = docker_host();
        runner.ok("docker compose version", "Docker Compose version v2.5.1\n");
        let runtime = ContainerRuntime::new(runner.clone());
        assert_eq!(runtime.info().await.unwrap().kind, EngineKind::Docker);

        runner.clear();
        runner
            .ok(PODMAN_VERSION, "podman version 4.4.1\n")
            .ok("podman compose version", "podman-compose version 1.0.6\n");
        runtime.reset();

        let info = runtime.info().await.expect("podman after reset");
        assert_eq!(info.kind, EngineKind::Podman);
        assert_eq!(info.kind, runtime.detect().await.unwrap());
        assert_eq!(info.version, "podman version 4.4.1");
        assert!(!info.compose_installed);
    }
}

mod liveness {
    use super::*;

    #[tokio::test]
    async fn running_when_ps_lists() {
        let runner = docker_host();
        runner.ok("docker ps", "CONTAINER ID   IMAGE   COMMAND   CREATED   STATUS\n");
        let runtime = ContainerRuntime::new(runner);

        assert!(runtime.is_running().await);
    }

    #[tokio::test]
    async fn not_running_when_daemon_is_down() {
        let runner = docker_host();
        runner.fail(
            "docker ps",
            1,
            "Cannot connect to the Docker daemon at unix:///var/run/docker.sock",
        );
        let runtime = ContainerRuntime::new(runner);

        assert!(!runtime.is_running().await);
    }

    #[tokio::test]
    async fn empty_output_is_not_running() {
        let runner = docker_host();
        runner.ok("docker ps", "  \n");
        let runtime = ContainerRuntime::new(runner);

        assert!(!runtime.is_running().await);
    }

    #[tokio::test]
    async fn not_running_without_engine() {
        let runtime = ContainerRuntime::new(ScriptedRunner::new());
        assert!(!runtime.is_running().await);
    }
}

mod access {
    use super::*;

    #[tokio::test]
    async fn docker_member_has_access() {
        let runner = docker_host();
        runner.ok("id -Gn", "alice wheel docker\n");
        let runtime = ContainerRuntime::new(runner);

        assert!(runtime.requires_group().await);
        assert!(runtime.has_group_access().await);
    }

    #[tokio::test]
    async fn group_match_is_exact() {
        let runner = docker_host();
        runner.ok("id -Gn", "alice dockerroot\n");
        let runtime = ContainerRuntime::new(runner);

        assert!(!runtime.has_group_access().await);
    }

    #[tokio::test]
    async fn configured_group_is_used() {
        let runner = docker_host();
        runner.ok("id -Gn", "alice dockerroot\n");
        let settings = RuntimeSettings {
            engine_group: "dockerroot".to_string(),
        };
        let runtime = ContainerRuntime::with_settings(runner, settings);

        assert!(runtime.has_group_access().await);
    }

    #[tokio::test]
    async fn failed_group_lookup_is_not_satisfied() {
        let runner = docker_host();
        runner.fail("id -Gn", 1, "id: cannot find name for group ID 1000");
        let runtime = ContainerRuntime::new(runner);

        assert!(!runtime.has_group_access().await);
    }

    #[tokio::test]
    async fn podman_never_needs_group() {
        let runner = podman_host("podman version 5.2.2");
        runner.ok("id -Gn", "alice\n");
        let runtime = ContainerRuntime::new(runner.clone());

        assert!(!runtime.requires_group().await);
        assert!(runtime.has_group_access().await);
        assert_eq!(runner.count("id -Gn"), 0);
    }
}

mod network {
    use super::*;

    #[tokio::test]
    async fn docker_uses_engine_default() {
        let runtime = ContainerRuntime::new(docker_host());
        assert_eq!(runtime.network_mode().await, None);
    }

    #[tokio::test]
    async fn podman_4_4_uses_pasta() {
        let runtime = ContainerRuntime::new(podman_host("podman version 4.4.1"));
        assert_eq!(runtime.network_mode().await, Some(NetworkMode::Pasta));
    }

    #[tokio::test]
    async fn other_podman_uses_slirp4netns() {
        let runtime = ContainerRuntime::new(podman_host("podman version 5.2.2"));
        assert_eq!(runtime.network_mode().await, Some(NetworkMode::Slirp4netns));
    }

    #[tokio::test]
    async fn shim_with_failing_version_probe_falls_back() {
        let runner = ScriptedRunner::new();
        runner.ok(DOCKER_VERSION, "Emulate Docker CLI using podman\n");
        let runtime = ContainerRuntime::new(runner);

        assert_eq!(runtime.network_mode().await, Some(NetworkMode::Slirp4netns));
    }
}
