/*!
Fixed reference tables bundled with the aggregator. These figures come from
the project's one-time offline evaluation; the backend attaches them to each
snapshot as-is and never recomputes them from the dataset or the notebooks.
*/

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
	pub name: &'static str,
	pub auc: f32,
	pub accuracy: f32,
	/// 1-based, dense, ordered by descending AUC. Ties keep their input
	/// order.
	pub rank: usize,
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
	vec![
		LeaderboardEntry {
			name: "GradientBoosting",
			auc: 0.9372,
			accuracy: 0.8913,
			rank: 1,
		},
		LeaderboardEntry {
			name: "KNeighbors",
			auc: 0.9333,
			accuracy: 0.8804,
			rank: 2,
		},
		LeaderboardEntry {
			name: "LogisticRegression",
			auc: 0.9320,
			accuracy: 0.8859,
			rank: 3,
		},
		LeaderboardEntry {
			name: "RandomForest",
			auc: 0.9320,
			accuracy: 0.8587,
			rank: 4,
		},
		LeaderboardEntry {
			name: "SVC",
			auc: 0.9311,
			accuracy: 0.8641,
			rank: 5,
		},
	]
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct LeakageComparison {
	pub with_leakage_auc: f32,
	pub without_leakage_auc: f32,
	pub difference: f32,
	pub impact: &'static str,
}

pub fn leakage_comparison() -> LeakageComparison {
	let with_leakage_auc = 1.0000;
	let without_leakage_auc = 0.9311;
	LeakageComparison {
		with_leakage_auc,
		without_leakage_auc,
		difference: with_leakage_auc - without_leakage_auc,
		impact: "Preprocessing fit on the full dataset leaked the test split into \
			training and reported a perfect AUC of 1.0000. Fitting inside the \
			cross-validation folds brings it down to the honest 0.9311.",
	}
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct ProjectStage {
	pub name: &'static str,
	pub status: &'static str,
	pub description: &'static str,
	pub file: &'static str,
}

pub fn project_stages() -> Vec<ProjectStage> {
	vec![
		ProjectStage {
			name: "Stage 1",
			status: "completed",
			description: "Data leakage demonstration and model comparison",
			file: "notebooks/1_model_leakage_demo.ipynb",
		},
		ProjectStage {
			name: "Stage 2",
			status: "completed",
			description: "Pipeline with cross validation",
			file: "notebooks/2_model_pipeline_cv.ipynb",
		},
		ProjectStage {
			name: "Stage 3",
			status: "completed",
			description: "Inference API and Docker image",
			file: "app/",
		},
		ProjectStage {
			name: "Stage 4",
			status: "completed",
			description: "Local Kubernetes deployment",
			file: "k8s/deployment.yaml",
		},
		ProjectStage {
			name: "Stage 5",
			status: "completed",
			description: "Continuous integration workflow",
			file: ".github/workflows/ci.yml",
		},
		ProjectStage {
			name: "Stage 6",
			status: "completed",
			description: "Data drift monitoring",
			file: "notebooks/3_data_drift_monitoring.ipynb",
		},
	]
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Achievement {
	pub title: &'static str,
	pub detail: &'static str,
}

pub fn achievements() -> Vec<Achievement> {
	vec![
		Achievement {
			title: "Detected and corrected data leakage",
			detail: "A perfect 1.0000 AUC was traced to preprocessing fit outside \
				the folds and corrected to 0.9311.",
		},
		Achievement {
			title: "Compared five model families",
			detail: "Gradient boosting won on AUC with 0.9372 across a leaderboard \
				of five candidates.",
		},
		Achievement {
			title: "Shipped a containerized inference service",
			detail: "The winning pipeline serves predictions from a Docker image.",
		},
		Achievement {
			title: "Deployed to a local cluster",
			detail: "The service runs under a local Kubernetes deployment with a \
				health probe.",
		},
		Achievement {
			title: "Automated the checks",
			detail: "A continuous integration workflow runs the test suite on \
				every push.",
		},
		Achievement {
			title: "Monitors for drift",
			detail: "A monitoring notebook tracks feature drift against the \
				training distribution.",
		},
	]
}

/// The canonical diagnostic input: one raw value per input column of the
/// deployed artifact, enum values given by option index. Age 45, female,
/// atypical angina, resting blood pressure 130, cholesterol 240, fasting
/// blood sugar below threshold, normal resting ECG, max heart rate 150, no
/// exercise angina, oldpeak 0.5, upsloping ST segment.
pub fn test_patient() -> Vec<f32> {
	vec![45.0, 0.0, 1.0, 130.0, 240.0, 0.0, 1.0, 150.0, 0.0, 0.5, 2.0]
}

#[test]
fn test_leaderboard_ranks_are_dense_and_sorted() {
	let leaderboard = leaderboard();
	for (index, entry) in leaderboard.iter().enumerate() {
		assert_eq!(entry.rank, index + 1);
	}
	for pair in leaderboard.windows(2) {
		assert!(pair[0].auc >= pair[1].auc);
	}
}

#[test]
fn test_leakage_difference() {
	let leakage = leakage_comparison();
	assert!(leakage.difference >= 0.0);
	assert!((leakage.difference - (leakage.with_leakage_auc - leakage.without_leakage_auc)).abs() < f32::EPSILON);
	assert!((leakage.difference - 0.0689).abs() < 1e-6);
}

#[test]
fn test_test_patient_shape() {
	assert_eq!(test_patient().len(), 11);
}
