use glam::IVec2;

use super::{Game, State, PROGRESS_KEY};
use crate::assets::{AudioId, ImageId};
use crate::config::TimeSource;
use crate::host::Host;
use crate::input::Action;
use crate::level::{decode, Collision, LoopedTime, PlayerInput, Simulation, TickClock};
use crate::video::Color;

const RESULT_OVERLAY_ALPHA: u8 = 196;

impl Game {
    /// Decode stage `index` and start playing it.  A map that fails to decode
    /// is reported through the host and leaves the select screen in place.
    pub(super) fn start_level(&mut self, host: &mut impl Host, index: usize) {
        let entry = self.config.levels[index].clone();

        let level = match decode(self.assets.image(entry.image), index + 1, &mut self.rng) {
            Ok(level) => level,
            Err(e) => {
                log::error!("{e}");
                host.show_alert(&e.to_string());
                return;
            }
        };
        log::info!("starting stage {} ({:?}, {} bpm)", index + 1, entry.image, entry.bpm);

        self.stop_audio(host, AudioId::TitleSong);
        self.current = index;
        self.sim = Simulation::new(level, TickClock::from_bpm(entry.bpm), self.config.movement);
        self.restart_level(host);
        self.set_state(State::Play);
    }

    /// Rewind the stage, recentre the camera and start its song.
    fn restart_level(&mut self, host: &mut impl Host) {
        self.play_audio(host, self.level_music());
        self.music_time = LoopedTime::new();
        let now = self.play_time(&*host);
        self.sim.restart(now);
        self.camera.snap(self.sim.player);
    }

    fn level_music(&self) -> AudioId {
        self.config.levels[self.current].music
    }

    fn wall_image(&self) -> ImageId {
        self.config.levels[self.current].wall
    }

    /// Time the tick clock runs on. A looping song keeps counting up.
    fn play_time(&mut self, host: &impl Host) -> f32 {
        match (self.config.time_source, self.assets.audio(self.level_music())) {
            (TimeSource::Music, Some(handle)) => {
                self.music_time.advance(host.audio_time_ms(handle) as f32)
            }
            _ => host.now_ms() as f32,
        }
    }

    pub(super) fn frame_play(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);

        if self.pressed(Action::Back) {
            self.play_audio(host, AudioId::TitleSong);
            self.stop_audio(host, self.level_music());
            self.set_state(State::Select);
            return;
        }

        match self.sim.collision(self.config.god_mode) {
            Collision::Death => {
                self.stop_audio(host, self.level_music());
                self.play_audio(host, AudioId::Fail);
                self.set_state(State::Lose);
                return;
            }
            Collision::Finish => {
                self.unlocked += 1;
                host.set_persisted_integer(PROGRESS_KEY, self.unlocked);
                log::info!("stage {} complete, unlocked {}", self.current + 1, self.unlocked + 1);
                self.set_state(State::Win);
                return;
            }
            Collision::None => {}
        }

        let now = self.play_time(&*host);
        let input = PlayerInput {
            up: self.pressed(Action::Up),
            down: self.pressed(Action::Down),
            advance: self.pressed(Action::Advance),
        };
        if self.sim.update(now, input) && self.config.play_cowbell {
            self.play_audio(host, AudioId::Cowbell);
        }

        self.draw_level();
        self.camera.follow(self.sim.player);
    }

    pub(super) fn frame_win(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);
        self.draw_level();
        self.draw_overlay(RESULT_OVERLAY_ALPHA);

        self.print_centered("LEVEL", 4);
        self.print_centered("COMPLETE", 12);
        self.print_centered("ESC: Menu", 36);

        if self.pressed(Action::Back) {
            self.stop_audio(host, self.level_music());
            self.play_audio(host, AudioId::TitleSong);
            self.set_state(State::Select);
        }
    }

    pub(super) fn frame_lose(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);
        self.draw_level();
        self.draw_overlay(RESULT_OVERLAY_ALPHA);

        self.print_centered("GAME OVER", 4);
        self.print_centered("RTN: Again", 28);
        self.print_centered("ESC: Menu", 37);

        if self.pressed(Action::Confirm) {
            self.restart_level(host);
            self.set_state(State::Play);
        }
        if self.pressed(Action::Back) {
            self.play_audio(host, AudioId::TitleSong);
            self.set_state(State::Select);
        }
    }

    /// Walls, finish tiles, spikes, blocks, then the player, all relative to
    /// the camera.  Tiles entirely off screen are skipped.
    fn draw_level(&mut self) {
        let wall = self.wall_image();
        let level = &self.sim.level;
        let camera = self.camera;

        let mut tiles: Vec<(ImageId, IVec2)> = Vec::new();
        let mut push = |id: ImageId, tile: IVec2| {
            let screen = camera.tile_to_screen(tile);
            if camera.is_visible(screen) {
                tiles.push((id, screen));
            }
        };

        for y in 0..level.height as i32 {
            for x in 0..level.width as i32 {
                let tile = IVec2::new(x, y);
                if level.is_wall(tile) {
                    push(wall, tile);
                }
            }
        }
        for finish in &level.finish {
            push(ImageId::Finish, finish.tile);
        }
        for spike in &level.spikes {
            let id = if spike.is_up { ImageId::SpikesUp } else { ImageId::SpikesDown };
            push(id, spike.entity.tile);
        }
        for block in &level.moving_blocks {
            push(ImageId::MovingBlock, block.entity.tile);
        }

        for (id, screen) in tiles {
            self.draw_tile(id, screen);
        }
        self.draw_tile(ImageId::Player, camera.tile_to_screen(self.sim.player));
    }
}
