use std::path::PathBuf;

use super::*;
use crate::audio::backend::{BackendCall, DryRunBackend};

fn asset_root(name: &str, with_music: bool) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "stellar_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(root.join("sounds")).unwrap();
    if with_music {
        std::fs::write(root.join("sounds/background-music.mp3"), b"ID3").unwrap();
    }
    root
}

#[test]
fn autoplay_starts_looped_quiet_track() {
    let root = asset_root("music_autoplay", true);
    let mut backend = DryRunBackend::new(&root);
    let mut music = BackgroundMusic::new(&AudioOpts::default());

    assert_eq!(music.start(&mut backend), MusicState::Playing);
    assert_eq!(
        backend.calls(),
        &[BackendCall::Play(
            Channel::Music,
            PlayRequest {
                path: "sounds/background-music.mp3".to_string(),
                volume: 0.3,
                looped: true,
            }
        )]
    );
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn blocked_autoplay_leaves_music_paused_until_toggled() {
    let root = asset_root("music_blocked", true);
    let mut backend = DryRunBackend::new(&root).with_autoplay_blocked();
    let mut music = BackgroundMusic::new(&AudioOpts::default());

    assert_eq!(music.start(&mut backend), MusicState::Paused);
    assert_eq!(music.toggle(&mut backend), MusicState::Playing);
    assert_eq!(music.toggle(&mut backend), MusicState::Paused);
    assert_eq!(backend.calls().last(), Some(&BackendCall::Pause(Channel::Music)));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_track_is_unavailable() {
    let root = asset_root("music_missing", false);
    let mut backend = DryRunBackend::new(&root);
    let mut music = BackgroundMusic::new(&AudioOpts::default());

    assert_eq!(music.start(&mut backend), MusicState::Unavailable);
    assert_eq!(music.toggle(&mut backend), MusicState::Unavailable);
    assert!(backend.calls().is_empty());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn no_autoplay_waits_paused() {
    let root = asset_root("music_manual", true);
    let mut backend = DryRunBackend::new(&root);
    let opts = AudioOpts {
        autoplay: false,
        ..AudioOpts::default()
    };
    let mut music = BackgroundMusic::new(&opts);
    assert_eq!(music.start(&mut backend), MusicState::Paused);
    assert!(backend.calls().is_empty());

    music.toggle(&mut backend);
    music.stop(&mut backend);
    assert_eq!(music.state(), MusicState::Paused);
    let _ = std::fs::remove_dir_all(&root);
}
