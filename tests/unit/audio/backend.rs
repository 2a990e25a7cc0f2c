use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stellar_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn request(path: &str) -> PlayRequest {
    PlayRequest {
        path: path.to_string(),
        volume: 0.5,
        looped: false,
    }
}

#[test]
fn defaults_validate() {
    let opts = AudioOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.music_volume, 0.3);
    assert_eq!(opts.voice_volume, 0.8);
}

#[test]
fn out_of_range_volume_is_rejected() {
    let opts = AudioOpts {
        voice_volume: 1.2,
        ..AudioOpts::default()
    };
    let err = opts.validate().unwrap_err();
    assert!(err.to_string().contains("voice_volume"));

    let opts = AudioOpts {
        music_path: " ".to_string(),
        ..AudioOpts::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn dry_run_resolves_files_under_root() {
    let root = temp_dir("dry_run_resolve");
    std::fs::create_dir_all(root.join("sounds")).unwrap();
    std::fs::write(root.join("sounds/a.mp3"), b"ID3").unwrap();

    let mut backend = DryRunBackend::new(&root);
    assert!(backend.probe("sounds/a.mp3"));
    assert!(!backend.probe("sounds/b.mp3"));

    backend.play(Channel::Voice, &request("sounds/a.mp3")).unwrap();
    assert_eq!(
        backend.play(Channel::Voice, &request("sounds/b.mp3")),
        Err(PlaybackError::Missing("sounds/b.mp3".to_string()))
    );
    backend.stop(Channel::Voice);
    assert_eq!(
        backend.calls(),
        &[
            BackendCall::Play(Channel::Voice, request("sounds/a.mp3")),
            BackendCall::Stop(Channel::Voice),
        ]
    );

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn blocked_autoplay_needs_a_gesture() {
    let root = temp_dir("dry_run_blocked");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("m.mp3"), b"ID3").unwrap();

    let mut backend = DryRunBackend::new(&root).with_autoplay_blocked();
    assert!(matches!(
        backend.play(Channel::Music, &request("m.mp3")),
        Err(PlaybackError::Blocked(_))
    ));
    backend.user_gesture();
    backend.play(Channel::Music, &request("m.mp3")).unwrap();

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn playback_error_converts_to_story_error() {
    let e: StoryError = PlaybackError::Backend("device lost".to_string()).into();
    assert!(matches!(e, StoryError::Playback(_)));
    assert!(e.to_string().contains("device lost"));
}
