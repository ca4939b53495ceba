/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;

pub type Vector3f = nalgebra::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;
