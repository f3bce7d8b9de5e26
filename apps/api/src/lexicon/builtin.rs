//! Built-in skill vocabulary, used when `SKILL_LEXICON_PATH` is not set.
//!
//! Each row is (canonical name, category, aliases). The canonical name is always
//! an alias of itself and does not need to be repeated.
//!
//! Bare "go" and "r" are left out on purpose: as plain English tokens they produce
//! more false positives than matches. Use "golang" or a custom lexicon file.

use super::SkillCategory::{self, *};

pub(super) const BUILTIN_SKILLS: &[(&str, SkillCategory, &[&str])] = &[
    // Languages
    ("python", Language, &["python3", "python 3"]),
    ("javascript", Language, &["js", "ecmascript", "es6", "java script"]),
    ("typescript", Language, &["ts", "type script"]),
    ("java", Language, &["openjdk", "java8", "java11", "java17"]),
    ("c++", Language, &["cpp", "c plus plus"]),
    ("c#", Language, &["csharp", "c sharp"]),
    ("golang", Language, &["go lang"]),
    ("rust", Language, &["rust lang"]),
    ("php", Language, &["php7", "php8"]),
    ("ruby", Language, &[]),
    ("swift", Language, &[]),
    ("kotlin", Language, &[]),
    ("scala", Language, &[]),
    ("matlab", Language, &[]),
    ("sql", Language, &["structured query language", "t-sql", "pl/sql"]),
    ("html", Language, &["html5"]),
    ("css", Language, &["css3", "scss", "sass"]),
    // Frameworks
    ("react", Framework, &["reactjs", "react.js", "react js"]),
    ("angular", Framework, &["angularjs", "angular.js"]),
    ("vue", Framework, &["vuejs", "vue.js"]),
    ("node.js", Framework, &["nodejs", "node js", "node"]),
    ("express.js", Framework, &["expressjs", "express js"]),
    ("django", Framework, &["django rest framework"]),
    ("flask", Framework, &[]),
    ("fastapi", Framework, &["fast api"]),
    ("spring", Framework, &["spring boot", "springboot", "spring framework"]),
    ("asp.net", Framework, &["aspnet", "asp.net core"]),
    (".net", Framework, &["dotnet", ".net core"]),
    ("laravel", Framework, &[]),
    ("rails", Framework, &["ruby on rails", "ror"]),
    // Databases
    ("mysql", Database, &["my sql"]),
    ("postgresql", Database, &["postgres", "postgre sql"]),
    ("mongodb", Database, &["mongo", "mongo db"]),
    ("redis", Database, &[]),
    ("oracle", Database, &["oracle db", "oracle database"]),
    ("sql server", Database, &["mssql", "microsoft sql server"]),
    ("sqlite", Database, &["sqlite3"]),
    ("dynamodb", Database, &["dynamo db"]),
    ("cassandra", Database, &["apache cassandra"]),
    ("elasticsearch", Database, &["elastic search"]),
    // Cloud platforms
    ("aws", Cloud, &["amazon web services"]),
    ("azure", Cloud, &["microsoft azure"]),
    ("gcp", Cloud, &["google cloud", "google cloud platform"]),
    // DevOps and tooling
    ("docker", DevOps, &["dockerfile", "docker compose"]),
    ("kubernetes", DevOps, &["k8s"]),
    ("terraform", DevOps, &[]),
    ("jenkins", DevOps, &[]),
    ("git", DevOps, &[]),
    ("github", DevOps, &[]),
    ("gitlab", DevOps, &[]),
    ("github actions", DevOps, &[]),
    ("gitlab ci", DevOps, &[]),
    ("ansible", DevOps, &[]),
    ("puppet", DevOps, &[]),
    ("ci/cd", DevOps, &["cicd", "continuous integration"]),
    // Data science
    ("pandas", DataScience, &[]),
    ("numpy", DataScience, &[]),
    ("scikit-learn", DataScience, &["sklearn", "scikit learn"]),
    ("tensorflow", DataScience, &[]),
    ("pytorch", DataScience, &["torch"]),
    ("matplotlib", DataScience, &[]),
    ("jupyter", DataScience, &["jupyter notebook"]),
    ("spark", DataScience, &["apache spark", "pyspark"]),
    ("hadoop", DataScience, &[]),
    ("machine learning", DataScience, &["ml"]),
    // Mobile
    ("android", Mobile, &[]),
    ("ios", Mobile, &[]),
    ("react native", Mobile, &[]),
    ("flutter", Mobile, &[]),
    ("xamarin", Mobile, &[]),
    // Testing
    ("selenium", Testing, &[]),
    ("junit", Testing, &[]),
    ("pytest", Testing, &[]),
    ("jest", Testing, &[]),
    ("mocha", Testing, &[]),
    ("cypress", Testing, &[]),
    ("postman", Testing, &[]),
    // Design
    ("figma", Design, &[]),
    ("adobe xd", Design, &[]),
    ("photoshop", Design, &["adobe photoshop"]),
    ("illustrator", Design, &["adobe illustrator"]),
    // Project management
    ("agile", ProjectManagement, &[]),
    ("scrum", ProjectManagement, &[]),
    ("kanban", ProjectManagement, &[]),
    ("jira", ProjectManagement, &[]),
    ("confluence", ProjectManagement, &[]),
    // Soft skills
    ("leadership", SoftSkill, &[]),
    ("communication", SoftSkill, &["communication skills"]),
    ("teamwork", SoftSkill, &["team work"]),
    ("problem solving", SoftSkill, &["problem-solving"]),
    ("critical thinking", SoftSkill, &[]),
    ("time management", SoftSkill, &[]),
    ("adaptability", SoftSkill, &[]),
];
