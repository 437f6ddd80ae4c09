use std::fs;
use std::path::{Path, PathBuf};

use loadout_content::ContentFactory;
use loadout_core::{
    CharacterId, CostumeId, MemoryId, OptimizeRequest, OptimizerConfig, OptimizerEnv, SlotId,
    optimize,
};

fn shipped_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn copy_data(to: &Path) {
    for name in ["skills.toml", "special_skills.toml", "roster.ron", "memories.ron"] {
        fs::copy(shipped_data().join(name), to.join(name)).unwrap();
    }
}

#[test]
fn shipped_data_loads() {
    let content = ContentFactory::new(shipped_data()).load_all().unwrap();

    assert!(content.skills.is_fixer("フィクサー"));
    assert!(content.skills.normal("走り速度＋").unwrap().kind.is_multiplicative());

    let (owner, costume) = content.roster.costume(CostumeId(2)).unwrap();
    assert_eq!(owner.id, CharacterId(1));
    assert_eq!(costume.slot(SlotId(201)).unwrap().equipped, Some(MemoryId(2)));

    let variants = content.roster.variants_of(owner);
    assert_eq!(variants.len(), 2);
}

#[test]
fn shipped_data_optimizes() {
    let content = ContentFactory::new(shipped_data()).load_all().unwrap();
    let character = content.roster.character(CharacterId(1)).unwrap();
    let config = OptimizerConfig::default();

    let results = optimize(
        character,
        &OptimizeRequest::new(["走り速度＋", "最大HP＋"]),
        OptimizerEnv::new(&content.skills, &content.memories, &config),
    )
    .unwrap();

    assert_eq!(results.len(), character.costumes.len());
    assert!(results[0].score > 0.0);
    // Memory 10 comes from a variant of the owner and never fits.
    assert!(results.iter().all(|result| {
        result
            .assignment
            .iter()
            .all(|(_, memory)| memory != MemoryId(10))
    }));
}

#[test]
fn dangling_equipped_memory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    copy_data(dir.path());

    let roster = fs::read_to_string(dir.path().join("roster.ron")).unwrap();
    fs::write(
        dir.path().join("roster.ron"),
        roster.replace("equipped: {1: 2, 11: 5}", "equipped: {1: 99}"),
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(err.to_string().contains("unknown memory 99"));
}

#[test]
fn overlapping_skill_tables_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    copy_data(dir.path());

    let mut special = fs::read_to_string(dir.path().join("special_skills.toml")).unwrap();
    special.push_str("\n[[special]]\nname = \"最大HP＋\"\nlevels = [1.0]\n");
    fs::write(dir.path().join("special_skills.toml"), special).unwrap();

    let err = ContentFactory::new(dir.path()).load_skills().unwrap_err();
    assert!(err.to_string().contains("both a normal and a special"));
}
