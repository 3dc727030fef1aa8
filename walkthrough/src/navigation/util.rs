use cgmath::Vector3;
use rapier3d::prelude::{Point, Real, Vector};

pub fn vec_to_npoint(vec: Vector3<f32>) -> Point<Real> {
    Point::new(vec.x, vec.y, vec.z)
}

pub fn vec_to_nvec(vec: Vector3<f32>) -> Vector<Real> {
    Vector::new(vec.x, vec.y, vec.z)
}
