//! Question Catalog
//!
//! Ordered, read-only list of questions shared by every session.
//! Ordering is the array order; the catalog itself never reorders or
//! skips anything. That belongs to the transition function.

use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::foundation::QuestionId;

use super::errors::CatalogError;
use super::question::Question;

/// Immutable ordered set of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, validating ids, prompts, options and reactions.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
            if question.prompt.trim().is_empty() {
                return Err(CatalogError::EmptyPrompt(question.id.clone()));
            }
            if let Some(options) = &question.options {
                if options.is_empty() || options.iter().any(|o| o.trim().is_empty()) {
                    return Err(CatalogError::NoOptions(question.id.clone()));
                }
                let mut distinct = HashSet::new();
                for option in options {
                    if !distinct.insert(option.as_str()) {
                        return Err(CatalogError::DuplicateOption {
                            question_id: question.id.clone(),
                            option: option.clone(),
                        });
                    }
                }
                if let Some(unknown) = question.reactions.keys().find(|k| !distinct.contains(k.as_str())) {
                    return Err(CatalogError::UnknownReactionOption {
                        question_id: question.id.clone(),
                        option: unknown.clone(),
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    /// Parses a `questions:` YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.questions)
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn first(&self) -> &Question {
        // Non-empty by construction
        &self.questions[0]
    }

    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id == id)
    }

    /// Id following `current` in catalog order; `None` when exhausted or unknown.
    pub fn next_id(&self, current: &QuestionId) -> Option<&QuestionId> {
        let index = self.position(current)?;
        self.questions.get(index + 1).map(|q| &q.id)
    }

    pub fn required_count(&self) -> usize {
        self.questions.iter().filter(|q| q.required).count()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Default career questionnaire.
    pub fn builtin() -> Self {
        let id = |s: &str| QuestionId::new(s).expect("builtin ids are non-empty");
        let questions = vec![
            Question::choice(
                id("q1"),
                "あなたの現在の職業は何ですか？",
                ["会社員", "自営業", "学生", "その他"],
            )
            .with_reaction("会社員", "企業でのお仕事、お疲れ様です。次の質問に進みましょう。")
            .with_reaction("自営業", "自分のビジネスを経営されているのですね。次の質問に進みましょう。")
            .with_reaction("学生", "学業との両立、頑張ってくださいね。次の質問に進みましょう。")
            .with_reaction("その他", "承知しました。次の質問に進みましょう。"),
            Question::choice(
                id("q2"),
                "キャリアについて最も関心のある分野はどれですか？",
                ["技術スキル向上", "マネジメント能力", "起業・独立", "ワークライフバランス"],
            )
            .with_reaction("技術スキル向上", "専門性を高めることは重要ですね。次の質問に進みましょう。")
            .with_reaction("マネジメント能力", "人をまとめる力は貴重なスキルです。次の質問に進みましょう。")
            .with_reaction("起業・独立", "自分のビジョンを形にするのは素晴らしいことです。次の質問に進みましょう。")
            .with_reaction("ワークライフバランス", "充実した人生のために大切な視点ですね。次の質問に進みましょう。"),
            Question::text(id("q3"), "あなたの主要なスキルを教えてください"),
            Question::choice(
                id("q4"),
                "希望年収を教えてください",
                ["400万円以下", "400-600万円", "600-800万円", "800-1000万円", "1000万円以上"],
            )
            .optional(),
            Question::choice(
                id("q5"),
                "今後のキャリアでどのような支援が欲しいですか？",
                ["メンタリング", "スキルトレーニング", "ネットワーキング", "キャリアカウンセリング"],
            )
            .with_reaction("メンタリング", "経験者からのアドバイスは貴重ですね。")
            .with_reaction("スキルトレーニング", "実践的なスキルを身につけることは重要です。")
            .with_reaction("ネットワーキング", "人脈は大切な資産になりますね。")
            .with_reaction("キャリアカウンセリング", "専門家のアドバイスで道が開けることもあります。"),
        ];

        Self::new(questions).expect("builtin catalog is valid")
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
