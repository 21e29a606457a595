//! Grouping engine for infrastructure dependency graphs.
//!
//! Resources are partitioned by their top-level module into named groups. Each
//! group holds its member nodes and only the edges that stay inside it. Users
//! regroup by merging one group into another; every change goes through an
//! undo/redo [`History`] owned by a [`GroupingSession`].
//!
//! ```
//! use tfmap_graph::grouping::{Edge, GraphModel, GroupingSession, Node};
//!
//! let graph = GraphModel::new(
//!     [
//!         Node::new("a.module.vpc.x", "aws_vpc").with_module_path("a.module.vpc.x"),
//!         Node::new("a.module.db.z", "aws_db_instance").with_module_path("a.module.db.z"),
//!     ],
//!     [Edge::new("a.module.vpc.x", "a.module.db.z")],
//! );
//! let mut session = GroupingSession::with_graph(graph, &Default::default());
//! assert_eq!(session.group_keys(), ["vpc", "db"]);
//!
//! session.merge_groups("db", "vpc").unwrap();
//! assert_eq!(session.group("vpc").unwrap().edges.len(), 1);
//! ```

mod elements;
mod history;
mod key;
mod merge;
mod model;
mod partition;
mod session;
mod store;
mod summary;

pub use elements::{EdgeElement, ElementList, NodeElement, short_label, to_elements};
pub use history::History;
pub use key::{MISC_KEY, ROOT_KEY, key_of};
pub use merge::{MergeRejection, merge};
pub use model::{Compound, DEFAULT_EDGE_KIND, Edge, EdgeKind, GraphModel, Node};
pub use partition::partition;
pub use session::GroupingSession;
pub use store::{Group, GroupKey, GroupStore};
pub use summary::{GroupLink, GroupSummary, LayerCounts, cross_group_links, display_name, summarize};
