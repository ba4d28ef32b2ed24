//! Prompt construction for the reasoning service.

use crate::domain::foundation::{group_thousands, round_half_up};
use crate::domain::risk::RiskAssessment;

const OUTPUT_SCHEMA: &str = r#"{
  "root_cause": "Brief explanation of why this is at risk",
  "mitigation_options": [
    {
      "option": "Option name",
      "description": "What to do",
      "estimated_cost_usd": 0,
      "implementation_time_days": 0,
      "risk_reduction_pct": 0
    }
  ],
  "recommended_action": "Which option to choose and why",
  "confidence_level": "High/Medium/Low",
  "expected_roi": "Cost savings vs. investment"
}"#;

/// A rendered consultant prompt for one assessed component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPrompt(String);

impl RecommendationPrompt {
    pub fn for_assessment(assessment: &RiskAssessment) -> Self {
        let prompt = format!(
            "You are a Senior Supply Chain Consultant for an Aviation MRO organization.

COMPONENT ANALYSIS REQUEST:

Component Details:
- Part Number: {part_number}
- Description: {description}
- Category: {category}
- Criticality: {criticality}

Current Situation:
- Current Stock: {current_stock} units
- Safety Stock: {safety_stock} units
- Lead Time: {lead_time} days
- Supplier Region: {region}
- Supplier Risk: {supplier_risk}

Financial Impact:
- AOG Cost Exposure: ${exposure}
- Risk Score: {score} (scale 0-130)

TASK:
Provide a strategic recommendation to mitigate this risk. Consider:
1. Root cause (why is this component at risk?)
2. Potential mitigation options (emergency orders, alternate suppliers, inventory adjustment)
3. Cost-benefit analysis for each option
4. Your recommended action with confidence level

OUTPUT FORMAT (JSON):
{schema}

Respond ONLY with valid JSON, no additional text.",
            part_number = assessment.part_number,
            description = assessment.description,
            category = assessment.category,
            criticality = assessment.criticality,
            current_stock = assessment.current_stock,
            safety_stock = assessment.safety_stock,
            lead_time = assessment.lead_time_days,
            region = assessment.region,
            supplier_risk = assessment.risk_exposure,
            exposure = group_thousands(assessment.financial_exposure_usd),
            score = round_half_up(assessment.composite_risk_score, 0),
            schema = OUTPUT_SCHEMA,
        );
        Self(prompt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
