pub mod assets;
pub mod audio;
pub mod camera;
pub mod config;
pub mod engine;
pub mod game;
pub mod host;
pub mod input;
pub mod level;
pub mod renderer;
pub mod storage;
pub mod video;
pub mod window;
