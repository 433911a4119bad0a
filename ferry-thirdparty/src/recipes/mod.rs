//! Recipes for the libraries ferry knows how to build

pub mod lua;
