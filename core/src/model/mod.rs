pub mod playlist;
pub mod song;

pub mod rel_playlist_song;
