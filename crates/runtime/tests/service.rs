use std::sync::Arc;
use std::time::Duration;

use loadout_core::{
    BaseStats, Character, CharacterClass, CharacterId, CoreError, Costume, CostumeId, EquipError,
    LevelTable, Memory, MemoryCatalog, MemoryId, OptimizeRequest, OptimizerEnv, Rarity, Role,
    Roster, SkillCatalog, SkillDefinition, Slot, SlotId, SpecialPins, SpecialSkillDefinition,
    optimize,
};
use loadout_runtime::{
    InMemoryRepository, LoadoutRepository, OptimizerService, RuntimeConfig, RuntimeError,
};

fn skills() -> SkillCatalog {
    SkillCatalog::new(
        [
            SkillDefinition::new("最大HP＋", "最大HPが上がる", LevelTable::from_values([3.0, 6.0, 10.0, 12.0])),
            SkillDefinition::new("走り速度＋", "走り速度が上がる", LevelTable::from_values([1.01, 1.02, 1.05, 1.06])),
        ],
        [
            SpecialSkillDefinition::new("フィクサー", "効果量を増幅", LevelTable::from_values([1.2, 1.4, 1.6, 2.0, 2.2])),
            SpecialSkillDefinition::new("ガード強化", "ガード性能が上がる", LevelTable::from_values([1.0; 5])),
        ],
    )
    .unwrap()
}

fn slot(costume: u32, number: u8, role: &str, max_level: u8) -> Slot {
    Slot::new(SlotId(costume * 100 + u32::from(number)), number, Role::from(role), max_level)
}

fn costume(id: u32, max_level: u8) -> Costume {
    Costume::new(
        CostumeId(id),
        format!("コスチューム{id}"),
        Rarity::SuperRare,
        CharacterId(1),
        "緑谷出久",
        vec![
            slot(id, 1, "Strike", max_level),
            slot(id, 2, "Strike", max_level),
            slot(id, 11, "Strike", 4),
            slot(id, 12, "Strike", 5),
        ],
    )
    .unwrap()
}

fn memory(id: u32, owner: &str) -> Memory {
    Memory::new(MemoryId(id), CharacterId(id + 100), owner, Role::from("Strike"), Some(CharacterClass::Hero))
}

fn roster() -> Roster {
    let owner = Character::new(
        CharacterId(1),
        "緑谷出久",
        Role::from("Strike"),
        CharacterClass::Hero,
        BaseStats::default(),
    )
    .with_costumes((1..=7).map(|id| costume(id, 1 + (id % 4) as u8)).collect());
    let variant = Character::new(
        CharacterId(2),
        "緑谷出久（OFA）",
        Role::from("Rapid"),
        CharacterClass::Hero,
        BaseStats::default(),
    );
    let other = Character::new(
        CharacterId(3),
        "爆豪勝己",
        Role::from("Assault"),
        CharacterClass::Hero,
        BaseStats::default(),
    );
    Roster::new(vec![owner, variant, other])
}

fn memories() -> MemoryCatalog {
    MemoryCatalog::new(vec![
        memory(1, "爆豪勝己").with_tuning_skill("最大HP＋"),
        memory(2, "轟焦凍").with_tuning_skill("走り速度＋"),
        memory(3, "飯田天哉").with_special_skill("フィクサー"),
        memory(4, "麗日お茶子").with_special_skill("ガード強化"),
        memory(5, "緑谷出久（OFA）").with_tuning_skill("最大HP＋"),
    ])
    .unwrap()
}

fn service(config: RuntimeConfig) -> OptimizerService<InMemoryRepository> {
    let repository = Arc::new(InMemoryRepository::new(roster(), memories()));
    OptimizerService::new(repository, Arc::new(skills()), config)
}

#[tokio::test]
async fn concurrent_search_matches_sequential_optimizer() {
    let request = OptimizeRequest::new(["最大HP＋", "走り速度＋"]);
    let config = RuntimeConfig::default().with_workers(3);

    let concurrent = service(config.clone())
        .optimize(CharacterId(1), &request)
        .await
        .unwrap();

    let roster = roster();
    let memories = memories();
    let skills = skills();
    let sequential = optimize(
        roster.character(CharacterId(1)).unwrap(),
        &request,
        OptimizerEnv::new(&skills, &memories, &config.optimizer),
    )
    .unwrap();

    assert_eq!(concurrent.len(), 5);
    assert_eq!(concurrent, sequential);
}

#[tokio::test]
async fn single_worker_still_finishes() {
    let results = service(RuntimeConfig::default().with_workers(1))
        .optimize(CharacterId(1), &OptimizeRequest::new(["最大HP＋"]))
        .await
        .unwrap();
    assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
    // The owner's own variant memory never shows up.
    assert!(
        results
            .iter()
            .all(|result| result.assignment.iter().all(|(_, memory)| memory != MemoryId(5)))
    );
}

#[tokio::test]
async fn request_errors_are_validation_errors() {
    let service = service(RuntimeConfig::default());

    let err = service
        .optimize(CharacterId(1), &OptimizeRequest::new(["  "]))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "OPTIMIZE_INVALID_INPUT");

    let err = service
        .optimize(CharacterId(99), &OptimizeRequest::new(["最大HP＋"]))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CharacterNotFound(CharacterId(99))));
    assert!(!err.severity().is_internal());
}

#[tokio::test]
async fn zero_timeout_abandons_the_call() {
    let config = RuntimeConfig::default().with_timeout(Duration::ZERO);
    let result = service(config)
        .optimize(CharacterId(1), &OptimizeRequest::new(["最大HP＋"]))
        .await;
    // A zero deadline may still race a finished search; anything else is a timeout.
    if let Err(err) = result {
        assert!(matches!(err, RuntimeError::Timeout(_)));
    }
}

#[tokio::test]
async fn pinned_skill_restricts_results() {
    let request = OptimizeRequest::new(["最大HP＋"]).with_pins(SpecialPins::new().with_slot_2("ガード強化"));
    let results = service(RuntimeConfig::default())
        .optimize(CharacterId(1), &request)
        .await
        .unwrap();

    assert!(!results.is_empty());
    for result in &results {
        let pinned = result.assignment.get(SlotId(result.costume_id.0 * 100 + 12));
        assert_eq!(pinned, Some(MemoryId(4)));
    }
}

#[tokio::test]
async fn apply_configuration_persists_and_reports() {
    let service = service(RuntimeConfig::default());

    let assignment = service
        .apply_configuration(
            CostumeId(1),
            &[(SlotId(101), MemoryId(1)), (SlotId(111), MemoryId(3))],
        )
        .await
        .unwrap();
    assert_eq!(assignment.len(), 2);

    let (_, stored) = service.repository().costume(CostumeId(1)).await.unwrap().unwrap();
    assert_eq!(stored.slot(SlotId(101)).unwrap().equipped, Some(MemoryId(1)));

    let report = service.costume_effects(CostumeId(1)).await.unwrap();
    assert_eq!(report.character_name, "緑谷出久");
    // Slot 1 sits at level 1 (3 HP) and the Fixer reads slot 11's max level 4 (×2.0).
    assert_eq!(report.effects.len(), 1);
    assert_eq!(report.effects[0].name, "最大HP＋");
    assert_eq!(report.effects[0].value, "+6");
    assert_eq!(report.special_skills, ["フィクサー"]);
}

#[tokio::test]
async fn invalid_configuration_is_not_saved() {
    let service = service(RuntimeConfig::default());
    service
        .apply_configuration(CostumeId(1), &[(SlotId(101), MemoryId(1))])
        .await
        .unwrap();

    let err = service
        .apply_configuration(CostumeId(1), &[(SlotId(101), MemoryId(5))])
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Equip(EquipError::Incompatible { .. })));

    let (_, stored) = service.repository().costume(CostumeId(1)).await.unwrap().unwrap();
    assert_eq!(stored.slot(SlotId(101)).unwrap().equipped, Some(MemoryId(1)));

    let err = service
        .apply_configuration(CostumeId(42), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CostumeNotFound(CostumeId(42))));
}

#[tokio::test]
async fn equip_checks_against_the_current_loadout() {
    let service = service(RuntimeConfig::default());

    service.equip(CostumeId(2), SlotId(201), MemoryId(1)).await.unwrap();
    let err = service
        .equip(CostumeId(2), SlotId(202), MemoryId(1))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "EQUIP_INCOMPATIBLE");

    let assignment = service.equip(CostumeId(2), SlotId(202), MemoryId(2)).await.unwrap();
    assert_eq!(assignment.get(SlotId(201)), Some(MemoryId(1)));
    assert_eq!(assignment.get(SlotId(202)), Some(MemoryId(2)));

    let err = service
        .equip(CostumeId(2), SlotId(999), MemoryId(2))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Equip(EquipError::UnknownSlot(SlotId(999)))));
}

#[tokio::test]
async fn unequip_clears_one_slot_or_all() {
    let service = service(RuntimeConfig::default());
    service
        .apply_configuration(
            CostumeId(3),
            &[(SlotId(301), MemoryId(1)), (SlotId(302), MemoryId(2)), (SlotId(312), MemoryId(4))],
        )
        .await
        .unwrap();

    let assignment = service.unequip(CostumeId(3), SlotId(301)).await.unwrap();
    assert_eq!(assignment.get(SlotId(301)), None);
    assert_eq!(assignment.get(SlotId(302)), Some(MemoryId(2)));

    let (_, stored) = service.repository().costume(CostumeId(3)).await.unwrap().unwrap();
    assert_eq!(stored.slot(SlotId(301)).unwrap().equipped, None);
    assert_eq!(stored.slot(SlotId(312)).unwrap().equipped, Some(MemoryId(4)));

    let err = service.unequip(CostumeId(3), SlotId(999)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Equip(EquipError::UnknownSlot(SlotId(999)))));

    service.unequip_all(CostumeId(3)).await.unwrap();
    let (_, stored) = service.repository().costume(CostumeId(3)).await.unwrap().unwrap();
    assert!(stored.slots().iter().all(|slot| slot.equipped.is_none()));

    let err = service.unequip_all(CostumeId(42)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::CostumeNotFound(CostumeId(42))));
}

#[tokio::test]
async fn slot_levels_move_within_bounds_and_feed_the_report() {
    let service = service(RuntimeConfig::default());
    // Costume 1's Normal slots top out at level 2.
    service
        .apply_configuration(CostumeId(1), &[(SlotId(101), MemoryId(1)), (SlotId(111), MemoryId(3))])
        .await
        .unwrap();

    assert_eq!(service.level_up(CostumeId(1), SlotId(101)).await.unwrap(), 2);
    let err = service.level_up(CostumeId(1), SlotId(101)).await.unwrap_err();
    assert_eq!(err.error_code(), "SLOT_LEVEL_AT_MAX");
    assert!(!err.severity().is_internal());

    // HP at level 2 is 6, doubled by the Fixer.
    let report = service.costume_effects(CostumeId(1)).await.unwrap();
    assert_eq!(report.effects[0].value, "+12");

    assert_eq!(service.level_down(CostumeId(1), SlotId(101)).await.unwrap(), 1);
    let err = service.level_down(CostumeId(1), SlotId(101)).await.unwrap_err();
    assert_eq!(err.error_code(), "SLOT_LEVEL_AT_MIN");

    let err = service.set_level(CostumeId(1), SlotId(101), 5).await.unwrap_err();
    assert_eq!(err.error_code(), "SLOT_LEVEL_OUT_OF_RANGE");
    assert_eq!(service.set_level(CostumeId(1), SlotId(101), 2).await.unwrap(), 2);

    let (_, stored) = service.repository().costume(CostumeId(1)).await.unwrap().unwrap();
    assert_eq!(stored.slot(SlotId(101)).unwrap().current_level, 2);

    let err = service.set_level(CostumeId(1), SlotId(999), 1).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Equip(EquipError::UnknownSlot(SlotId(999)))));
}

#[tokio::test]
async fn lists_special_skills_and_variants() {
    let service = service(RuntimeConfig::default());

    assert_eq!(service.special_skills().await.unwrap(), ["ガード強化", "フィクサー"]);

    let variants = service.variants(CharacterId(2)).await.unwrap();
    let ids: Vec<_> = variants.iter().map(|character| character.id).collect();
    assert_eq!(ids, [CharacterId(1), CharacterId(2)]);
}
