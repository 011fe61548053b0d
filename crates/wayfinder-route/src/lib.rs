//! Wayfinder Route Matching
//!
//! Maps a path such as `/posts/123/edit` onto a pattern such as `/posts/:id`:
//! - Literal segments must match verbatim
//! - `:name` segments capture the path segment at the same position
//! - Whatever is left over becomes the `tail`, which feeds a nested route
//!
//! ```
//! use wayfinder_route::Route;
//!
//! let route = Route::new("/posts/:id", "/posts/123/edit");
//! assert!(route.active());
//! assert_eq!(route.param("id"), Some("123"));
//!
//! let action = route.sub_route("/:action");
//! assert_eq!(action.param("action"), Some("edit"));
//! ```

mod pattern;
mod route;

pub use pattern::{RoutePattern, Segment, CAPTURE_MARKER};
pub use route::{match_route, Route, RouteMatch};
