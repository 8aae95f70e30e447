//! # Vessel Feature
//!
//! 单艘载具的灯光包装。
//!
//! ## 延迟初始化
//!
//! 第一次批量操作时才枚举载具零件并逐个包装，包装数量达到
//! `max_parts_to_use` 后停止，剩余零件对这艘载具永远不纳入管理。
//! 初始化完成前按零件单独访问也会创建包装（同样受上限约束）；
//! 初始化完成后，未知零件一律返回占位包装。

use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

use super::cache::ModuleCache;
use super::handle::{InstanceId, Part, Vessel};
use super::part::PartFeature;
use super::regime::Regime;
use crate::config::Settings;

/// 载具灯光包装
pub struct VesselFeature {
    settings: Option<Rc<dyn Settings>>,
    cache: Rc<ModuleCache>,
    vessel: Rc<dyn Vessel>,
    parts: Vec<PartFeature>,
    index: HashMap<InstanceId, usize>,
    saved: HashMap<String, bool>,
    needs_initialization: bool,
    disposed: bool,
    dummy: PartFeature,
}

impl VesselFeature {
    pub fn new(settings: Rc<dyn Settings>, cache: Rc<ModuleCache>, vessel: Rc<dyn Vessel>) -> Self {
        Self {
            settings: Some(settings),
            cache,
            vessel,
            parts: Vec::new(),
            index: HashMap::new(),
            saved: HashMap::new(),
            needs_initialization: true,
            disposed: false,
            dummy: PartFeature::dummy(),
        }
    }

    /// 被包装的载具
    pub fn vessel(&self) -> &Rc<dyn Vessel> {
        &self.vessel
    }

    /// 是否还未枚举零件
    pub fn needs_initialization(&self) -> bool {
        self.needs_initialization
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// 已包装的零件数
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 已包装的零件（包装顺序）
    pub fn features(&self) -> impl Iterator<Item = &PartFeature> {
        self.parts.iter()
    }

    /// 获取零件包装
    ///
    /// 已初始化、已释放或达到上限时，未知零件返回占位包装。
    pub fn part(&mut self, part: &Rc<dyn Part>) -> &PartFeature {
        if let Some(&i) = self.index.get(&part.instance_id()) {
            return &self.parts[i];
        }
        if !self.needs_initialization || self.disposed || self.is_full() {
            return &self.dummy;
        }
        match self.wrap(Rc::clone(part)) {
            Some(i) => &self.parts[i],
            None => &self.dummy,
        }
    }

    /// 点亮所有处于活动状态、且未被规则排除的灯
    pub fn turn_on(&mut self, regime: Option<&Regime>) {
        self.ensure_initialized();
        for feature in self.parts.iter().filter(|p| p.is_active()) {
            feature.turn_on(regime);
        }
    }

    /// 熄灭所有处于活动状态、且未被规则排除的灯
    pub fn turn_off(&mut self, regime: Option<&Regime>) {
        self.ensure_initialized();
        for feature in self.parts.iter().filter(|p| p.is_active()) {
            feature.turn_off(regime);
        }
    }

    /// 无条件点亮指定零件
    pub fn turn_on_parts(&mut self, parts: &[Rc<dyn Part>]) {
        for part in parts {
            self.part(part).turn_on(None);
        }
    }

    /// 无条件熄灭指定零件
    pub fn turn_off_parts(&mut self, parts: &[Rc<dyn Part>]) {
        for part in parts {
            self.part(part).turn_off(None);
        }
    }

    /// 记录每个零件当前的开关状态（覆盖上一次记录）
    pub fn push_state(&mut self) {
        self.ensure_initialized();
        self.saved = self
            .parts
            .iter()
            .map(|p| (p.id().to_string(), p.is_on()))
            .collect();
        debug!(vessel = %self.vessel.name(), saved = self.saved.len(), "保存灯光状态");
    }

    /// 按记录恢复开关状态；没有记录的零件保持不变
    pub fn pop_state(&mut self) {
        self.ensure_initialized();
        for feature in &self.parts {
            match self.saved.get(feature.id()) {
                Some(true) => feature.turn_on(None),
                Some(false) => feature.turn_off(None),
                None => {}
            }
        }
        debug!(vessel = %self.vessel.name(), "恢复灯光状态");
    }

    /// 已纳入管理的零件
    pub fn parts_with_light(&mut self) -> Vec<Rc<dyn Part>> {
        self.ensure_initialized();
        self.parts
            .iter()
            .filter_map(|p| p.part().cloned())
            .collect()
    }

    /// 释放设置与所有零件包装，重复调用无副作用
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.settings = None;
        self.saved.clear();
        self.parts.clear();
        self.index.clear();
        self.needs_initialization = false;
        self.disposed = true;
        debug!(vessel = %self.vessel.name(), "载具灯光包装已释放");
    }

    fn ensure_initialized(&mut self) {
        if self.needs_initialization && !self.disposed {
            self.init();
        }
    }

    fn init(&mut self) {
        let parts = self.vessel.parts();
        let total = parts.len();
        for part in parts {
            if self.index.contains_key(&part.instance_id()) {
                continue;
            }
            if self.is_full() || self.wrap(part).is_none() {
                break;
            }
        }
        if total > self.parts.len() {
            debug!(
                vessel = %self.vessel.name(),
                total = total,
                used = self.parts.len(),
                "零件数超出上限，只管理前一部分零件"
            );
        }
        self.needs_initialization = false;
    }

    fn wrap(&mut self, part: Rc<dyn Part>) -> Option<usize> {
        let settings = Rc::clone(self.settings.as_ref()?);
        let id = part.instance_id();
        let feature = PartFeature::new(settings, &self.cache, part, self.vessel.instance_id());
        self.parts.push(feature);
        let i = self.parts.len() - 1;
        self.index.insert(id, i);
        Some(i)
    }

    fn is_full(&self) -> bool {
        self.parts.len() >= self.max_parts_to_use()
    }

    fn max_parts_to_use(&self) -> usize {
        self.settings
            .as_ref()
            .map(|s| s.max_parts_to_use())
            .unwrap_or(0)
    }
}

impl Drop for VesselFeature {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for VesselFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VesselFeature")
            .field("vessel", &self.vessel.instance_id())
            .field("parts", &self.parts.len())
            .field("needs_initialization", &self.needs_initialization)
            .field("disposed", &self.disposed)
            .finish()
    }
}
