//! Integer identifiers assigned by the backend.
//!
//! Each entity gets its own newtype so a quote id can never be passed where a
//! movie id is expected. All of them serialize as bare integers.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw integer value used in request paths.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, formatter)
            }
        }
    };
}

entity_id!(
    /// Identifier of a quote.
    QuoteId
);
entity_id!(
    /// Identifier of a movie.
    MovieId
);
entity_id!(
    /// Identifier of a comment.
    CommentId
);
entity_id!(
    /// Identifier of a like relation between a user and a quote.
    LikeId
);
entity_id!(
    /// Identifier of a user account.
    UserId
);
entity_id!(
    /// Identifier of a movie genre.
    GenreId
);
