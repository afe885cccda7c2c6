//! Playback of pre-recorded particle tracks.
//!
//! Tracks are stored as JSON: an array of tracks, each an array of `[x, y,
//! z]` points. Playback feeds a fixed number of points per frame so a track
//! grows on screen the way it would during a live simulation.

use std::path::Path;

use glam::Vec3;

use crate::engine::FrameSource;
use crate::error::TrackviewError;

/// Frame sequencer over recorded tracks, one track at a time.
#[derive(Debug, Clone)]
pub struct TrajectoryFeed {
    tracks: Vec<Vec<Vec3>>,
    points_per_frame: usize,
    current_track: usize,
    /// Index of the next point not yet emitted in the current track.
    cursor: usize,
    playing: bool,
}

impl TrajectoryFeed {
    /// Feed over `tracks`, emitting `points_per_frame` new points per frame
    /// (at least one).
    #[must_use]
    pub fn new(tracks: Vec<Vec<Vec3>>, points_per_frame: usize) -> Self {
        Self {
            tracks,
            points_per_frame: points_per_frame.max(1),
            current_track: 0,
            cursor: 0,
            playing: true,
        }
    }

    /// Decode tracks from a JSON string.
    ///
    /// # Errors
    ///
    /// [`TrackviewError::TrajectoryParse`] if the JSON is not an array of
    /// point arrays.
    pub fn from_json(
        json: &str,
        points_per_frame: usize,
    ) -> Result<Self, TrackviewError> {
        let raw: Vec<Vec<[f32; 3]>> = serde_json::from_str(json)
            .map_err(|e| TrackviewError::TrajectoryParse(e.to_string()))?;
        let tracks = raw
            .into_iter()
            .map(|track| track.into_iter().map(Vec3::from_array).collect())
            .collect();
        Ok(Self::new(tracks, points_per_frame))
    }

    /// Read and decode a JSON track file.
    ///
    /// # Errors
    ///
    /// I/O failures and malformed JSON.
    pub fn load(
        path: &Path,
        points_per_frame: usize,
    ) -> Result<Self, TrackviewError> {
        let json = std::fs::read_to_string(path)?;
        let feed = Self::from_json(&json, points_per_frame)?;
        log::info!(
            "loaded {} tracks ({} points) from {}",
            feed.total_tracks(),
            feed.total_points(),
            path.display()
        );
        Ok(feed)
    }

    /// Set how many new points are emitted per frame (at least one).
    pub fn set_points_per_frame(&mut self, points_per_frame: usize) {
        self.points_per_frame = points_per_frame.max(1);
    }

    /// Number of tracks.
    #[must_use]
    pub fn total_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Number of points across all tracks.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.tracks.iter().map(Vec::len).sum()
    }

    /// Index of the track currently being played.
    #[must_use]
    pub fn current_track(&self) -> usize {
        self.current_track
    }

    /// Whether every track has been fully emitted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_track >= self.tracks.len()
    }

    /// Whether playback is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl FrameSource for TrajectoryFeed {
    /// The next chunk of the current track. Each chunk after the first
    /// repeats the previous chunk's last point so consecutive lines join.
    fn next_points(&mut self) -> Vec<Vec3> {
        if !self.playing {
            return Vec::new();
        }
        while let Some(track) = self.tracks.get(self.current_track) {
            if self.cursor < track.len() {
                let start = self.cursor.saturating_sub(1);
                let end = (self.cursor + self.points_per_frame).min(track.len());
                self.cursor = end;
                return track[start..end].to_vec();
            }
            self.current_track += 1;
            self.cursor = 0;
            if self.is_finished() {
                log::info!("trajectory playback finished");
            }
        }
        Vec::new()
    }

    fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        log::debug!(
            "trajectory playback {}",
            if self.playing { "resumed" } else { "paused" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn chunks_overlap_by_one_point() {
        let mut feed = TrajectoryFeed::new(vec![line(7)], 3);
        assert_eq!(feed.next_points(), line(3));
        assert_eq!(feed.next_points(), line(6)[2..].to_vec());
        assert_eq!(feed.next_points(), line(7)[5..].to_vec());
        assert!(feed.next_points().is_empty());
        assert!(feed.is_finished());
    }

    #[test]
    fn moves_on_to_next_track() {
        let second = vec![Vec3::Y, Vec3::Z];
        let mut feed = TrajectoryFeed::new(vec![line(2), second.clone()], 10);
        assert_eq!(feed.next_points(), line(2));
        assert_eq!(feed.next_points(), second);
        assert_eq!(feed.current_track(), 1);
        assert!(feed.next_points().is_empty());
    }

    #[test]
    fn skips_empty_tracks() {
        let mut feed = TrajectoryFeed::new(vec![Vec::new(), line(2)], 4);
        assert_eq!(feed.next_points(), line(2));
    }

    #[test]
    fn paused_feed_emits_nothing() {
        let mut feed = TrajectoryFeed::new(vec![line(5)], 2);
        feed.toggle_playback();
        assert!(!feed.is_playing());
        assert!(feed.next_points().is_empty());
        feed.toggle_playback();
        assert_eq!(feed.next_points(), line(2));
    }

    #[test]
    fn decodes_json_tracks() {
        let feed = TrajectoryFeed::from_json(
            "[[[0, 0, 0], [1, 2, 3]], [[4, 5, 6]]]",
            0,
        )
        .unwrap();
        assert_eq!(feed.total_tracks(), 2);
        assert_eq!(feed.total_points(), 3);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = TrajectoryFeed::from_json("[[1, 2]]", 4).unwrap_err();
        assert!(matches!(err, TrackviewError::TrajectoryParse(_)));
    }
}
