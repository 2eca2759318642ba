//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`courts`] - 场地管理
//! - [`clients`] - 客户管理
//! - [`employees`] - 员工 / 教练管理
//! - [`items`] - 租借物品
//! - [`prices`] - 价格表
//! - [`discounts`] - 折扣
//! - [`court_reservations`] - 场地预约 + 结算
//! - [`item_reservations`] - 物品预约
//! - [`transactions`] - 交易记录
//! - [`scheduler`] - 预约网格
//! - [`pricing`] - 实时报价

pub mod health;

// Facility
pub mod courts;
pub mod items;

// People
pub mod clients;
pub mod employees;

// Pricing
pub mod discounts;
pub mod prices;
pub mod pricing;
pub mod transactions;

// Reservations
pub mod court_reservations;
pub mod item_reservations;
pub mod scheduler;

// Re-export common types for handlers
pub use crate::utils::AppResult;
