pub mod handler;
pub mod memberships;
pub mod pagination;
pub mod playlists;
pub mod songs;
