use loadout_core::{
    Assignment, BaseStats, Character, CharacterClass, CharacterId, Costume, CostumeId, FilterMode,
    LevelTable, Memory, MemoryCatalog, MemoryId, OptimizeRequest, OptimizerConfig, OptimizerEnv,
    Rarity, Role, SkillCatalog, SkillDefinition, Slot, SlotId, SpecialPins,
    SpecialSkillDefinition, can_equip, eligible_costumes, optimize, optimize_costume,
};

const OWNER: &str = "緑谷出久";

fn skills() -> SkillCatalog {
    SkillCatalog::new(
        [
            SkillDefinition::new("走り速度＋", "走り速度が上がる", LevelTable::from_values([1.01, 1.02, 1.05, 1.06])),
            SkillDefinition::new("最大HP＋", "最大HPが上がる", LevelTable::from_values([3.0, 6.0, 10.0, 12.0])),
            SkillDefinition::new("HP防御力＋", "被ダメージ軽減", LevelTable::from_values([0.99, 0.98, 0.97, 0.96])),
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

fn costume(id: u32, slots: Vec<Slot>) -> Costume {
    Costume::new(CostumeId(id), format!("コスチューム{id}"), Rarity::SuperRare, CharacterId(1), OWNER, slots).unwrap()
}

fn memory(id: u32, owner: &str, role: &str) -> Memory {
    Memory::new(MemoryId(id), CharacterId(id + 100), owner, Role::from(role), Some(CharacterClass::Hero))
}

fn character(costumes: Vec<Costume>) -> Character {
    Character::new(CharacterId(1), OWNER, Role::from("Strike"), CharacterClass::Hero, BaseStats::default())
        .with_costumes(costumes)
}

#[test]
fn sprint_boots_scenario() {
    let memories = MemoryCatalog::new(vec![memory(1, "爆豪勝己", "Strike").with_tuning_skill("走り速度＋")]).unwrap();
    let character = character(vec![costume(1, vec![slot(1, 1, "Strike", 3)])]);
    let skills = skills();
    let config = OptimizerConfig::default();

    let results = optimize(
        &character,
        &OptimizeRequest::new(["走り速度＋"]),
        OptimizerEnv::new(&skills, &memories, &config),
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert!((results[0].score - 50.0).abs() < 1e-6);
    assert_eq!(results[0].configuration[0].memory_name, "爆豪勝己");
    assert_eq!(results[0].configuration[0].skill.as_deref(), Some("走り速度＋"));
}

#[test]
fn either_pin_falls_through_to_slot_twelve() {
    let memories = MemoryCatalog::new(vec![
        memory(1, "轟焦凍", "Strike").with_special_skill("ガード強化"),
        memory(2, "飯田天哉", "Rapid").with_special_skill("フィクサー"),
        memory(3, "麗日お茶子", "Strike").with_tuning_skill("最大HP＋"),
    ])
    .unwrap();
    let costume = costume(
        1,
        vec![slot(1, 1, "Strike", 3), slot(1, 6, "Strike", 3), slot(1, 11, "Rapid", 4), slot(1, 12, "Strike", 5)],
    );
    let skills = skills();
    let config = OptimizerConfig::default();
    let env = OptimizerEnv::new(&skills, &memories, &config);
    let pins = SpecialPins::new().with_either("ガード強化");
    let mode = FilterMode::from_pins(&pins);

    assert_eq!(eligible_costumes(std::slice::from_ref(&costume), &pins, mode, &memories).len(), 1);

    let result = optimize_costume(&costume, &["最大HP＋"], &pins, mode, env).unwrap();

    assert_eq!(result.assignment.get(SlotId(112)), Some(MemoryId(1)));
    assert_eq!(result.assignment.get(SlotId(111)), Some(MemoryId(2)));
    // Slot 11 feeds slots 1-5 only, so the HP memory lands there: 10 × 2.0.
    assert_eq!(result.assignment.get(SlotId(101)), Some(MemoryId(3)));
    assert!((result.score - 20.0).abs() < 1e-9);
}

#[test]
fn ranking_keeps_five_of_six() {
    let memories = MemoryCatalog::new(vec![memory(1, "爆豪勝己", "Strike").with_tuning_skill("最大HP＋")]).unwrap();
    let costumes = (1..=6u32)
        .map(|id| {
            let level = if id == 6 { 1 } else { 4 - (id % 4) as u8 };
            costume(id, vec![slot(id, 1, "Strike", level)])
        })
        .collect();
    let character = character(costumes);
    let skills = skills();
    let config = OptimizerConfig::default();

    let results = optimize(
        &character,
        &OptimizeRequest::new(["最大HP＋"]),
        OptimizerEnv::new(&skills, &memories, &config),
    )
    .unwrap();

    assert_eq!(results.len(), 5);
    assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
    // Costumes 3 and 6 both score 3; only the earlier one survives the cut.
    let ids: Vec<_> = results.iter().map(|r| r.costume_id).collect();
    assert_eq!(ids[0], CostumeId(4));
    assert!(ids.contains(&CostumeId(3)));
    assert!(!ids.contains(&CostumeId(6)));
}

#[test]
fn ranking_drops_exactly_the_lowest_of_six() {
    let memories = MemoryCatalog::new(vec![
        memory(1, "爆豪勝己", "Strike").with_tuning_skill("最大HP＋"),
        memory(2, "轟焦凍", "Strike").with_tuning_skill("最大HP＋"),
    ])
    .unwrap();
    // HP per level: 3, 6, 10, 12.
    let layouts: [&[u8]; 6] = [&[1], &[2], &[3], &[4], &[4, 4], &[3, 4]];
    let costumes = (1u32..)
        .zip(layouts)
        .map(|(id, levels)| {
            let slots = (1u8..).zip(levels).map(|(number, &level)| slot(id, number, "Strike", level)).collect();
            costume(id, slots)
        })
        .collect();
    let character = character(costumes);
    let skills = skills();
    let config = OptimizerConfig::default();

    let results = optimize(
        &character,
        &OptimizeRequest::new(["最大HP＋"]),
        OptimizerEnv::new(&skills, &memories, &config),
    )
    .unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.costume_id.0).collect();
    assert_eq!(ids, [5, 6, 4, 3, 2]);
    let scores: Vec<_> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, [24.0, 22.0, 12.0, 10.0, 6.0]);
}

#[test]
fn results_respect_equip_rules() {
    let memories = MemoryCatalog::new(vec![
        memory(1, "緑谷出久（OFA）", "Strike").with_tuning_skill("走り速度＋、最大HP＋"),
        memory(2, "爆豪勝己", "Strike").with_tuning_skill("走り速度＋"),
        memory(3, "轟焦凍", "Strike").with_tuning_skill("HP防御力＋"),
        memory(4, "飯田天哉", "Strike").with_special_skill("フィクサー"),
        memory(5, "蛙吹梅雨", "Strike").with_special_skill("フィクサー"),
        memory(6, "切島鋭児郎", "Assault").with_tuning_skill("走り速度＋"),
    ])
    .unwrap();
    let costume = costume(
        1,
        vec![
            slot(1, 1, "Strike", 3),
            slot(1, 2, "Strike", 3),
            slot(1, 3, "Assault", 4).with_class(CharacterClass::Villain),
            slot(1, 6, "Strike", 3),
            slot(1, 11, "Strike", 4),
            slot(1, 12, "Strike", 5),
        ],
    );
    let skills = skills();
    let config = OptimizerConfig::default();
    let env = OptimizerEnv::new(&skills, &memories, &config);

    let result = optimize_costume(&costume, &["走り速度＋", "HP防御力＋"], &SpecialPins::new(), FilterMode::None, env).unwrap();

    let mut seen = Vec::new();
    for (slot_id, memory_id) in result.assignment.iter() {
        assert!(!seen.contains(&memory_id), "memory {memory_id} assigned twice");
        seen.push(memory_id);
        let slot = costume.slot(slot_id).unwrap();
        let memory = memories.get(memory_id).unwrap();
        assert!(can_equip(slot, memory, &costume, &result.assignment));
    }
    assert!(!seen.contains(&MemoryId(1)));
    // Only the first Fixer is tried; slot 12 falls back to the catalog order.
    assert_eq!(result.assignment.get(SlotId(111)), Some(MemoryId(4)));
    assert_eq!(result.assignment.get(SlotId(112)), Some(MemoryId(2)));
    // The Villain slot has no Villain memory to hold.
    assert!(!result.assignment.is_assigned(SlotId(103)));
}

#[test]
fn assignment_snapshots_are_independent() {
    let base = Assignment::new().with(SlotId(101), MemoryId(1));
    let trial = base.with(SlotId(101), MemoryId(2));

    assert_eq!(base.get(SlotId(101)), Some(MemoryId(1)));
    assert_eq!(trial.get(SlotId(101)), Some(MemoryId(2)));
}
