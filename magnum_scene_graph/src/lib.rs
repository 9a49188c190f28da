/*!
# Magnum Scene Graph

Hierarchical scene graph with cached absolute transformations, backed by
matrix and dual-number rigid-transformation algebra.

Objects live in an arena (`SceneGraph`) and are addressed by stable keys.
Each graph is parameterized by a transformation strategy chosen at compile
time; the dimension (2D or 3D) follows from the strategy.

## Architecture

- **math**: `Dual`, `Complex`, `DualComplex`, `DualQuaternion`, rigid-matrix helpers
- **SceneGraph**: object arena, parenting, dirty/clean cache protocol
- **Transformation**: strategy trait (`compose`, `inverted`, `from_matrix`, `to_matrix`)
- **AbstractFeature**: hooks notified with recomputed absolute transformations
- **AbstractObject**: dimension-polymorphic object interface

## Example

```no_run
use magnum_scene_graph::magnum::scene_graph::{SceneGraph, MatrixTransformation3D};
use magnum_scene_graph::glam::Vec3;

let mut graph = SceneGraph::<MatrixTransformation3D>::new();
let scene = graph.add_scene();
let object = graph.add_object(Some(scene))?;
graph.object_mut(object)?.translate(Vec3::X).scale(Vec3::splat(2.0));
let absolute = graph.absolute_transformation_matrix(object)?;
# Ok::<(), magnum_scene_graph::magnum::Error>(())
```
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod scene_graph;

// Main magnum namespace module
pub mod magnum {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Scene graph sub-module
    pub mod scene_graph {
        pub use crate::scene_graph::*;
    }
}

// Re-export math library at crate root
pub use glam;
