//! Cloud resource inference for Spring Boot modules

pub mod engine;
pub mod rules;
pub mod spring;

pub use engine::RuleEngine;
pub use spring::{
    SpringBootVersion, detect_spring_boot_version, is_spring_boot_application,
    locate_spring_boot_version,
};
