//! Tween timeline
//!
//! Linear tweens between queued waypoints, one track per tile. Tracks
//! repeat according to their `Repeat` (forward/reverse when yoyo). The host
//! advances the timeline every frame and reads positions back out.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::{Animator, Repeat, Waypoint};

#[derive(Debug, Clone)]
struct Track {
    /// Where the first step starts from
    origin: Vec2,
    steps: Vec<Waypoint>,
    repeat: Repeat,
    /// Seconds since the first step began
    elapsed: f32,
    /// Last sampled position
    position: Vec2,
}

impl Track {
    fn at(position: Vec2) -> Self {
        Self {
            origin: position,
            steps: Vec::new(),
            repeat: Repeat::ONCE,
            elapsed: 0.0,
            position,
        }
    }

    fn pass_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    fn is_running(&self) -> bool {
        let total = self.pass_duration();
        if self.steps.is_empty() || total <= 0.0 {
            return false;
        }
        match self.repeat.passes() {
            Some(passes) => self.elapsed < total * passes as f32,
            None => true,
        }
    }

    /// Position at `elapsed`
    fn sample(&self) -> Vec2 {
        let total = self.pass_duration();
        if self.steps.is_empty() || total <= 0.0 {
            return self.position;
        }

        let pass = (self.elapsed / total).floor() as u64;
        let (pass, local) = match self.repeat.passes() {
            // Finished: hold the end of the final pass
            Some(passes) if pass >= passes => (passes - 1, total),
            _ => (pass, self.elapsed - pass as f32 * total),
        };
        let local = if self.repeat.yoyo && pass % 2 == 1 {
            total - local
        } else {
            local
        };

        self.point_at(local)
    }

    fn point_at(&self, mut t: f32) -> Vec2 {
        let mut from = self.origin;
        for step in &self.steps {
            let to = waypoint_pos(step);
            if t <= step.duration {
                let f = if step.duration > 0.0 {
                    t / step.duration
                } else {
                    1.0
                };
                return from.lerp(to, f.clamp(0.0, 1.0));
            }
            t -= step.duration;
            from = to;
        }
        from
    }
}

fn waypoint_pos(wp: &Waypoint) -> Vec2 {
    Vec2::new(wp.x as f32, wp.y as f32)
}

/// All tile tracks plus the global pause switch. Pausing survives
/// `cancel_all`, so a round started while paused waits for `resume_all`.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: BTreeMap<u32, Track>,
    paused: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every track by `dt` seconds (no-op while paused)
    pub fn advance(&mut self, dt: f32) {
        if self.paused || dt <= 0.0 {
            return;
        }
        for track in self.tracks.values_mut() {
            if track.is_running() {
                track.elapsed += dt;
                track.position = track.sample();
            }
        }
    }

    pub fn position(&self, tile: u32) -> Option<Vec2> {
        self.tracks.get(&tile).map(|t| t.position)
    }

    /// (tile, position) in tile order
    pub fn positions(&self) -> impl Iterator<Item = (u32, Vec2)> + '_ {
        self.tracks.iter().map(|(&tile, t)| (tile, t.position))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Any tile still has movement ahead of it
    pub fn is_animating(&self) -> bool {
        self.tracks.values().any(Track::is_running)
    }

    pub fn queued_steps(&self, tile: u32) -> usize {
        self.tracks.get(&tile).map_or(0, |t| t.steps.len())
    }
}

impl Animator for Timeline {
    fn place(&mut self, tile: u32, x: u32, y: u32) {
        self.tracks
            .insert(tile, Track::at(Vec2::new(x as f32, y as f32)));
    }

    fn enqueue(&mut self, tile: u32, step: Waypoint) {
        let track = self.tracks.entry(tile).or_insert_with(|| Track::at(Vec2::ZERO));
        if !track.is_running() {
            // Start a fresh sequence from wherever the tile is now
            track.origin = track.position;
            track.steps.clear();
            track.elapsed = 0.0;
        }
        track.steps.push(step);
    }

    fn set_repeat(&mut self, tile: u32, repeat: Repeat) {
        let track = self.tracks.entry(tile).or_insert_with(|| Track::at(Vec2::ZERO));
        track.repeat = repeat;
    }

    fn cancel_all(&mut self) {
        for track in self.tracks.values_mut() {
            track.origin = track.position;
            track.steps.clear();
            track.elapsed = 0.0;
        }
    }

    fn pause_all(&mut self) {
        self.paused = true;
    }

    fn resume_all(&mut self) {
        self.paused = false;
    }

    fn retain_tiles(&mut self, tile_count: u32) {
        self.tracks.retain(|&tile, _| tile <= tile_count);
    }
}
