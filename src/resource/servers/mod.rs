//! Compute servers: applications, virtual machines and bare metal hosts

pub mod applications;
pub mod metal;
pub mod virtual_servers;
