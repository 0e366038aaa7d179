use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::block::{BlockErrors, BlockField, BlockKind, ContentBlock};
use super::error::ContentError;

/// 内容块和它的错误信息放在同一个条目里，结构变更时一起移动
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub block: ContentBlock,
    pub errors: BlockErrors,
}

impl BlockEntry {
    fn new(block: ContentBlock) -> Self {
        Self {
            block,
            errors: BlockErrors::new(),
        }
    }
}

/// 有序的内容块列表，顺序即渲染顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentList {
    entries: Vec<BlockEntry>,
}

impl ContentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            entries: blocks.into_iter().map(BlockEntry::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&BlockEntry> {
        self.entries.get(index)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.entries.iter().map(|entry| &entry.block)
    }

    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.entries.into_iter().map(|entry| entry.block).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), ContentError> {
        if index >= self.entries.len() {
            return Err(ContentError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    /// 在末尾追加一个空白块，返回它的下标
    pub fn insert(&mut self, kind: BlockKind) -> usize {
        self.entries.push(BlockEntry::new(ContentBlock::new(kind)));
        self.entries.len() - 1
    }

    /// 删除块及其错误信息
    pub fn remove(&mut self, index: usize) -> Result<ContentBlock, ContentError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index).block)
    }

    /// 把 `source` 处的块移动到 `target`
    ///
    /// 先从 `source` 取出，再按取出后的下标插入到 `target`；
    /// `source == target` 时什么都不做。
    pub fn move_block(&mut self, source: usize, target: usize) -> Result<(), ContentError> {
        self.check_index(source)?;
        self.check_index(target)?;
        if source == target {
            return Ok(());
        }

        let entry = self.entries.remove(source);
        self.entries.insert(target, entry);
        Ok(())
    }

    /// 原地修改字段值，不做校验
    pub fn update_field(
        &mut self,
        index: usize,
        field: BlockField,
        value: impl Into<String>,
    ) -> Result<(), ContentError> {
        self.check_index(index)?;
        let slot = self.entries[index]
            .block
            .field_mut(field)
            .ok_or(ContentError::FieldNotApplicable { index, field })?;
        *slot = value.into();
        Ok(())
    }

    pub(crate) fn errors_mut(&mut self, index: usize) -> Result<&mut BlockErrors, ContentError> {
        self.check_index(index)?;
        Ok(&mut self.entries[index].errors)
    }

    pub(crate) fn clear_errors(&mut self) {
        for entry in &mut self.entries {
            entry.errors.clear();
        }
    }
}

impl Serialize for ContentList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.blocks())
    }
}

impl<'de> Deserialize<'de> for ContentList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<ContentBlock>::deserialize(deserializer).map(ContentList::from_blocks)
    }
}
