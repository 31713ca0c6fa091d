// ==========================================
// 农情智能查询核心 - 产量模型 Trait
// ==========================================
// 职责: 黑盒回归模型的唯一接口（产物实现 / 测试替身均实现此 Trait）
// ==========================================

use crate::model::error::ModelResult;
use crate::model::schema::{FeatureRow, ModelInputSchema};

// ==========================================
// YieldModel Trait
// ==========================================
// 实现者: LinearPipelineModel（JSON 产物）、测试中的 Mock 模型
pub trait YieldModel: Send + Sync {
    /// 模型声明的输入结构
    fn input_schema(&self) -> ModelInputSchema;

    /// 批量预测
    ///
    /// # 返回
    /// - Ok(Vec<f64>): 每行一个单产值（吨/公顷）
    /// - Err(ModelError): 推理失败
    fn predict(&self, rows: &[FeatureRow]) -> ModelResult<Vec<f64>>;

    /// 日志 / 诊断用描述
    fn describe(&self) -> String {
        format!("yield model {}", self.input_schema())
    }
}
