use nalgebra::{Point3, Unit, Vector3};

use crate::canvas::Color;

/// Offset used for the central differences in [`Scene::normal`].
const NORMAL_EPSILON: f32 = 0.0001;

#[derive(Debug)]
pub struct Scene {
    pub nodes: Vec<Node>,
    pub materials: Vec<Material>,
    pub light: Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaterialId(u32);

/// Primitive shapes, centered at the origin.
#[derive(Debug)]
pub enum Prim {
    /// A plane with the given normal, `offset` units from the origin along that normal.
    Plane {
        normal: Unit<Vector3<f32>>,
        offset: f32,
    },

    /// A sphere with the given radius.
    Sphere { radius: f32 },

    /// A box with the given half-extents along each axis.
    Box { half_extents: Vector3<f32> },
}

/// Nodes in the scene graph.
#[derive(Debug)]
pub enum Node {
    /// Primitive shapes.
    Prim { prim: Prim },

    /// The union of nodes.
    Union { nodes: Vec<NodeId> },

    /// The intersection of nodes.
    Intersect { nodes: Vec<NodeId> },

    /// Subtracting one node from another.
    Subtract { left: NodeId, right: NodeId },

    /// Move the node by `offset`.
    Translate { offset: Vector3<f32>, node: NodeId },

    /// Repeat the node in cells of size `period`. Axes with a non-positive period are not
    /// repeated.
    Repeat { period: Vector3<f32>, node: NodeId },

    /// Apply this material to the node.
    Paint { material: MaterialId, node: NodeId },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Distance(pub f32);

#[derive(Debug, Clone, Copy)]
pub struct SDFResult {
    /// The signed distance to the closest surface.
    pub distance: Distance,

    /// The material of the closest surface, if it was painted.
    pub material: Option<MaterialId>,
}

/// A Lambertian surface.
#[derive(Debug, Clone)]
pub struct Material {
    /// The fraction of incoming light reflected per channel, in `[0, 1]`.
    pub albedo: Color,
}

#[derive(Debug, Clone)]
pub enum Light {
    /// A point light at `position`.
    Point { position: Point3<f32>, color: Color },

    /// A light infinitely far away, in `direction` from every point in the scene.
    Directional {
        direction: Unit<Vector3<f32>>,
        color: Color,
    },
}

impl Light {
    pub fn intensity(&self) -> &Color {
        match self {
            Light::Point { color, .. } => color,
            Light::Directional { color, .. } => color,
        }
    }

    /// The unit direction from `point` towards the light.
    pub fn direction_from(&self, point: &Point3<f32>) -> Unit<Vector3<f32>> {
        match self {
            Light::Point { position, .. } => Unit::new_normalize(position - point),
            Light::Directional { direction, .. } => *direction,
        }
    }
}

impl Scene {
    pub fn new(light: Light) -> Self {
        Self {
            nodes: Vec::new(),
            materials: Vec::new(),
            light,
        }
    }

    #[inline]
    fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Fetch a node from the scene.
    #[inline]
    pub fn node(&self, NodeId(id): NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Construct a plane with the given normal in the scene.
    pub fn plane(&mut self, normal: Unit<Vector3<f32>>, offset: f32) -> NodeId {
        self.add_node(Node::Prim {
            prim: Prim::Plane { normal, offset },
        })
    }

    /// Construct a sphere with the given radius in the scene.
    pub fn sphere(&mut self, radius: f32) -> NodeId {
        self.add_node(Node::Prim {
            prim: Prim::Sphere { radius },
        })
    }

    /// Construct a box with the given half-extents in the scene.
    pub fn rect(&mut self, half_extents: Vector3<f32>) -> NodeId {
        self.add_node(Node::Prim {
            prim: Prim::Box { half_extents },
        })
    }

    pub fn union(&mut self, nodes: Vec<NodeId>) -> NodeId {
        assert!(!nodes.is_empty(), "no nodes given to `union`");
        self.add_node(Node::Union { nodes })
    }

    pub fn intersect(&mut self, nodes: Vec<NodeId>) -> NodeId {
        assert!(!nodes.is_empty(), "no nodes given to `intersect`");
        self.add_node(Node::Intersect { nodes })
    }

    pub fn subtract(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.add_node(Node::Subtract { left, right })
    }

    pub fn translate(&mut self, offset: Vector3<f32>, node: NodeId) -> NodeId {
        // fold nested translations together while building the scene.
        if let Node::Translate { offset: inner, node } = self.node(node) {
            let offset = offset + inner;
            let node = *node;
            self.add_node(Node::Translate { offset, node })
        } else {
            self.add_node(Node::Translate { offset, node })
        }
    }

    pub fn repeat(&mut self, period: Vector3<f32>, node: NodeId) -> NodeId {
        self.add_node(Node::Repeat { period, node })
    }

    pub fn paint(&mut self, material: MaterialId, node: NodeId) -> NodeId {
        self.add_node(Node::Paint { material, node })
    }

    pub fn diffuse(&mut self, albedo: Color) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(Material { albedo });
        id
    }

    #[inline]
    pub fn material(&self, MaterialId(id): MaterialId) -> &Material {
        &self.materials[id as usize]
    }

    /// Evaluate the field rooted at `root` at the point `p`.
    #[inline]
    pub fn sdf(&self, root: NodeId, p: &Point3<f32>) -> SDFResult {
        self.node(root).sdf(self, p)
    }

    /// The signed distance from `p` to the closest surface under `root`.
    #[inline]
    pub fn distance(&self, root: NodeId, p: &Point3<f32>) -> f32 {
        self.sdf(root, p).distance.0
    }

    /// The albedo of the surface closest to `p`. Unpainted surfaces are white.
    pub fn albedo(&self, root: NodeId, p: &Point3<f32>) -> Color {
        self.sdf(root, p)
            .material
            .map_or_else(|| Color::splat(1.), |id| self.material(id).albedo)
    }

    /// The surface normal at `p`, from the central-difference gradient of the field.
    pub fn normal(&self, root: NodeId, p: &Point3<f32>) -> Unit<Vector3<f32>> {
        let offset = Vector3::new(NORMAL_EPSILON, 0.0, 0.0);

        let diff =
            |off: Vector3<f32>| self.distance(root, &(p + off)) - self.distance(root, &(p - off));

        let dx = diff(offset.xyy());
        let dy = diff(offset.yxy());
        let dz = diff(offset.yyx());

        Unit::new_normalize(Vector3::new(dx, dy, dz))
    }
}

impl Prim {
    /// Compute the distance from `p` to the primitive. As primitives are all centered at the
    /// origin, there is no need to return more information than the distance.
    pub fn sdf(&self, p: &Point3<f32>) -> Distance {
        let pv = p.coords;
        match self {
            Prim::Plane { normal, offset } => Distance(pv.dot(normal) - offset),
            Prim::Sphere { radius } => Distance(pv.norm() - radius),
            Prim::Box { half_extents } => Distance((pv.abs() - half_extents).max()),
        }
    }
}

/// Fold `p` into the cell of a lattice with the given period, centered on the origin.
fn repeat_point(p: &Point3<f32>, period: &Vector3<f32>) -> Point3<f32> {
    let fold = |x: f32, c: f32| {
        if c > 0. {
            (x + 0.5 * c).rem_euclid(c) - 0.5 * c
        } else {
            x
        }
    };
    Point3::new(fold(p.x, period.x), fold(p.y, period.y), fold(p.z, period.z))
}

impl Node {
    pub fn sdf(&self, scene: &Scene, p: &Point3<f32>) -> SDFResult {
        match self {
            Node::Prim { prim } => SDFResult {
                distance: prim.sdf(p),
                material: None,
            },

            Node::Union { nodes } => nodes
                .iter()
                .map(|&id| scene.sdf(id, p))
                .min_by_key(|res| res.distance)
                .unwrap(),

            Node::Intersect { nodes } => nodes
                .iter()
                .map(|&id| scene.sdf(id, p))
                .max_by_key(|res| res.distance)
                .unwrap(),

            Node::Subtract { left, right } => {
                let left = scene.sdf(*left, p);
                let mut right = scene.sdf(*right, p);

                right.distance.0 = -right.distance.0;

                // the carved surface takes on the material of the node that carved it.
                if left.distance < right.distance {
                    right.material = right.material.or(left.material);
                    right
                } else {
                    left
                }
            }

            Node::Translate { offset, node } => scene.sdf(*node, &(p - offset)),

            Node::Repeat { period, node } => scene.sdf(*node, &repeat_point(p, period)),

            Node::Paint { material, node } => {
                let mut res = scene.sdf(*node, p);
                res.material = Some(*material);
                res
            }
        }
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Distance) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Distance) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Distance) -> std::cmp::Ordering {
        self.0.partial_cmp(&other.0).unwrap_or_else(|| {
            if self.0.is_nan() {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Less
            }
        })
    }
}
