pub mod dto;

pub use dto::{Artwork, ArtworkId, ArtworkPage, ArtworkPageQuery, Pagination};
