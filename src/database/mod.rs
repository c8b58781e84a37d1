pub mod models; // 数据库实体定义
pub mod repositories; // 数据库操作实现
